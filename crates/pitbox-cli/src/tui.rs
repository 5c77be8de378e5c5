use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use pitbox_models::{ConnectivityState, SessionSnapshot};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::{mpsc, watch};

pub type Tui = Terminal<CrosstermBackend<io::Stdout>>;

pub fn init() -> io::Result<Tui> {
    execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
    enable_raw_mode()?;
    Terminal::new(CrosstermBackend::new(io::stdout()))
}

pub fn restore() -> io::Result<()> {
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    disable_raw_mode()?;
    Ok(())
}

#[derive(Debug, Clone)]
pub enum Action {
    Tick,
    Resize(u16, u16),
    Key(event::KeyEvent),
    Session(SessionSnapshot),
    Connectivity(ConnectivityState),
}

pub struct EventHandler {
    sender: mpsc::UnboundedSender<Action>,
    receiver: mpsc::UnboundedReceiver<Action>,
}

impl EventHandler {
    pub fn new(tick_rate: u64) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();

        // 1. Tick loop, drives the typing indicator
        let tick_sender = sender.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_millis(tick_rate));
            loop {
                interval.tick().await;
                if tick_sender.send(Action::Tick).is_err() {
                    break;
                }
            }
        });

        // 2. Input loop (blocking thread)
        let event_sender = sender.clone();
        std::thread::spawn(move || loop {
            match event::read() {
                Ok(Event::Key(key)) => {
                    if key.kind == KeyEventKind::Press && event_sender.send(Action::Key(key)).is_err() {
                        break;
                    }
                }
                Ok(Event::Resize(w, h)) => {
                    if event_sender.send(Action::Resize(w, h)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
                _ => {}
            }
        });

        Self { sender, receiver }
    }

    /// Forward every session snapshot into the action stream.
    pub fn follow_session(&self, mut snapshots: watch::Receiver<SessionSnapshot>) {
        let sender = self.sender.clone();
        tokio::spawn(async move {
            while snapshots.changed().await.is_ok() {
                let snapshot = snapshots.borrow_and_update().clone();
                if sender.send(Action::Session(snapshot)).is_err() {
                    break;
                }
            }
        });
    }

    /// Forward the connectivity reading into the action stream until the
    /// probe settles.
    pub fn follow_connectivity(&self, mut state: watch::Receiver<ConnectivityState>) {
        let sender = self.sender.clone();
        tokio::spawn(async move {
            while state.changed().await.is_ok() {
                let current = *state.borrow_and_update();
                if sender.send(Action::Connectivity(current)).is_err() || current.is_settled() {
                    break;
                }
            }
        });
    }

    pub async fn next_async(&mut self) -> Option<Action> {
        self.receiver.recv().await
    }
}
