use pitbox_models::{ConnectivityState, Role, Turn};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app_state::{ChatApp, INPUT_SOFT_LIMIT};

pub fn render(app: &ChatApp, f: &mut Frame) {
    let [header, body, input] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(3),
    ])
    .areas(f.area());

    render_header(app, f, header);
    if app.snapshot.is_active() {
        render_transcript(app, f, body);
        render_input(app, f, input);
    } else {
        render_welcome(f, body);
    }
}

fn render_header(app: &ChatApp, f: &mut Frame, area: Rect) {
    let (label, color) = connectivity_badge(app.connectivity);
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "PIT BOX AI",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  NASCAR intelligence assistant  "),
        Span::styled(label, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::raw(format!("  LAP {}", app.snapshot.user_turn_count())),
    ]))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, area);
}

fn connectivity_badge(state: ConnectivityState) -> (&'static str, Color) {
    match state {
        ConnectivityState::Checking => ("CHECKING", Color::Yellow),
        ConnectivityState::Online => ("SYSTEM ONLINE", Color::Green),
        ConnectivityState::Offline => ("OFFLINE", Color::Red),
    }
}

fn render_welcome(f: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Welcome to the Pit Box",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from("Race strategy, drivers, teams and analytics on the radio."),
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter to start your engines, Esc to quit",
            Style::default().fg(Color::Yellow),
        )),
    ];
    let welcome = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(welcome, area);
}

fn render_transcript(app: &ChatApp, f: &mut Frame, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();
    for turn in app.snapshot.turns.iter() {
        lines.extend(turn_lines(turn));
        lines.push(Line::from(""));
    }
    if app.snapshot.pending {
        let dots = ".".repeat(1 + (app.frame % 3) as usize);
        lines.push(Line::from(Span::styled(
            format!("Pit Box is on the radio{dots}"),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
    }

    let block = Block::default().borders(Borders::ALL).title("Pit Box Assistant");
    let transcript = Paragraph::new(lines).wrap(Wrap { trim: false });
    let offset = tail_offset(&transcript, block.inner(area));
    f.render_widget(transcript.scroll((offset, 0)).block(block), area);
}

/// Scroll offset that keeps the last wrapped row of `transcript` inside
/// `inner`.
fn tail_offset(transcript: &Paragraph<'_>, inner: Rect) -> u16 {
    let rows = transcript.line_count(inner.width);
    let offset = rows.saturating_sub(usize::from(inner.height));
    u16::try_from(offset).unwrap_or(u16::MAX)
}

fn turn_lines(turn: &Turn) -> Vec<Line<'_>> {
    let (who, color) = match (turn.role, turn.failed) {
        (Role::User, _) => ("You", Color::Cyan),
        (Role::Assistant, false) => ("Pit Box", Color::LightRed),
        (Role::Assistant, true) => ("Pit Box (error)", Color::Red),
    };
    let body_style = if turn.failed {
        Style::default().fg(Color::Red)
    } else {
        Style::default()
    };

    let mut lines = vec![Line::from(vec![
        Span::styled(
            format!("[{}] ", turn.created_at.format("%H:%M:%S")),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(who, Style::default().fg(color).add_modifier(Modifier::BOLD)),
    ])];
    lines.extend(
        turn.content
            .lines()
            .map(|l| Line::from(Span::styled(l, body_style))),
    );
    lines
}

fn render_input(app: &ChatApp, f: &mut Frame, area: Rect) {
    let count = app.input.chars().count();
    let title = if app.snapshot.pending {
        "Waiting for the pit wall...".to_string()
    } else {
        format!("Message (Enter to send, Esc to quit)  {count} / {INPUT_SOFT_LIMIT}")
    };
    let style = if app.snapshot.pending {
        Style::default().fg(Color::DarkGray)
    } else if count > INPUT_SOFT_LIMIT {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Yellow)
    };

    let input = Paragraph::new(app.input.as_str())
        .style(style)
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(input, area);

    if !app.snapshot.pending {
        let width = u16::try_from(count).unwrap_or(u16::MAX);
        let x = area.x.saturating_add(1).saturating_add(width).min(area.right().saturating_sub(2));
        f.set_cursor_position((x, area.y + 1));
    }
}
