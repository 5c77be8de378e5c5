use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pitbox_models::{ConnectivityState, SessionSnapshot};
use pitbox_sdk::Intent;
use tokio::sync::mpsc::UnboundedSender;

use crate::tui::Action;

/// Soft limit shown next to the input; longer messages are still sent.
pub const INPUT_SOFT_LIMIT: usize = 500;

pub trait AppController {
    fn update(&mut self, action: Action);
    fn render(&mut self, f: &mut ratatui::Frame);
    fn should_quit(&self) -> bool;
}

/// Presentation state of the chat screen.
///
/// The session itself lives in its own task; this struct only mirrors the
/// latest snapshot and forwards intents.
pub struct ChatApp {
    pub(crate) snapshot: SessionSnapshot,
    pub(crate) connectivity: ConnectivityState,
    pub(crate) input: String,
    pub(crate) frame: u64,
    intents: UnboundedSender<Intent>,
    should_quit: bool,
}

impl ChatApp {
    pub fn new(snapshot: SessionSnapshot, intents: UnboundedSender<Intent>) -> Self {
        Self {
            snapshot,
            connectivity: ConnectivityState::Checking,
            input: String::new(),
            frame: 0,
            intents,
            should_quit: false,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if !self.snapshot.is_active() {
            match key.code {
                KeyCode::Enter => self.emit(Intent::Start),
                KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            // Input is disabled while a reply is pending.
            _ if self.snapshot.pending => {}
            KeyCode::Enter => {
                if !self.input.trim().is_empty() {
                    let text = std::mem::take(&mut self.input);
                    self.emit(Intent::Send(text));
                }
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) => self.input.push(c),
            _ => {}
        }
    }

    fn emit(&mut self, intent: Intent) {
        if self.intents.send(intent).is_err() {
            // Session task is gone; nothing left to talk to.
            self.should_quit = true;
        }
    }
}

impl AppController for ChatApp {
    fn update(&mut self, action: Action) {
        match action {
            Action::Tick => self.frame = self.frame.wrapping_add(1),
            Action::Resize(_, _) => {}
            Action::Key(key) => self.on_key(key),
            Action::Session(snapshot) => self.snapshot = snapshot,
            Action::Connectivity(state) => self.connectivity = state,
        }
    }

    fn render(&mut self, f: &mut ratatui::Frame) {
        crate::ui::chat::render(self, f);
    }

    fn should_quit(&self) -> bool {
        self.should_quit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pitbox_models::{SessionId, SessionPhase};
    use tokio::sync::mpsc;

    fn key(code: KeyCode) -> Action {
        Action::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(app: &mut ChatApp, text: &str) {
        for c in text.chars() {
            app.update(key(KeyCode::Char(c)));
        }
    }

    fn active(pending: bool) -> SessionSnapshot {
        SessionSnapshot {
            phase: SessionPhase::Active,
            pending,
            ..SessionSnapshot::idle(SessionId::new())
        }
    }

    #[test]
    fn enter_on_welcome_screen_starts_session() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut app = ChatApp::new(SessionSnapshot::idle(SessionId::new()), tx);

        app.update(key(KeyCode::Enter));
        assert_eq!(rx.try_recv().unwrap(), Intent::Start);
        assert!(!app.should_quit());
    }

    #[test]
    fn enter_sends_typed_message_and_clears_input() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut app = ChatApp::new(active(false), tx);

        type_text(&mut app, "who is leading?");
        app.update(key(KeyCode::Enter));

        assert_eq!(rx.try_recv().unwrap(), Intent::Send("who is leading?".into()));
        assert!(app.input.is_empty());
    }

    #[test]
    fn blank_input_is_not_sent() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut app = ChatApp::new(active(false), tx);

        type_text(&mut app, "   ");
        app.update(key(KeyCode::Enter));

        assert!(rx.try_recv().is_err());
        assert_eq!(app.input, "   ");
    }

    #[test]
    fn input_is_disabled_while_pending() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut app = ChatApp::new(active(true), tx);

        type_text(&mut app, "hello");
        app.update(key(KeyCode::Enter));

        assert!(app.input.is_empty());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn backspace_edits_input() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = ChatApp::new(active(false), tx);

        type_text(&mut app, "pitt");
        app.update(key(KeyCode::Backspace));
        assert_eq!(app.input, "pit");
    }

    #[test]
    fn snapshots_and_connectivity_replace_state() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = ChatApp::new(SessionSnapshot::idle(SessionId::new()), tx);

        app.update(Action::Connectivity(ConnectivityState::Offline));
        app.update(Action::Session(active(true)));

        assert_eq!(app.connectivity, ConnectivityState::Offline);
        assert!(app.snapshot.pending);
    }

    #[test]
    fn ctrl_c_and_esc_quit() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = ChatApp::new(active(true), tx);
        app.update(Action::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(app.should_quit());

        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = ChatApp::new(active(false), tx);
        app.update(key(KeyCode::Esc));
        assert!(app.should_quit());
    }

    #[test]
    fn closed_session_channel_quits() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let mut app = ChatApp::new(SessionSnapshot::idle(SessionId::new()), tx);
        app.update(key(KeyCode::Enter));
        assert!(app.should_quit());
    }
}
