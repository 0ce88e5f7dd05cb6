//! Status bar
//!
//! Displays the connection status, the player and the latest status message.

use dropfour_client::ConnectionStatus;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::App;

/// Render the status bar.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let status = app.session().status;
    let color = match status {
        ConnectionStatus::Connecting | ConnectionStatus::Waiting => Color::Yellow,
        ConnectionStatus::Playing | ConnectionStatus::Rejoined => Color::Green,
        ConnectionStatus::Ended => Color::Cyan,
        ConnectionStatus::Disconnected => Color::Red,
    };

    let mut spans = vec![Span::raw(" ")];
    if let Some(username) = app.username() {
        spans.push(Span::styled(
            format!("[{status}]"),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(format!(" {username}")));
    }
    if let Some(message) = app.status_message() {
        spans.push(Span::raw(format!(" | {message}")));
    }
    if app.auto_play() {
        spans.push(Span::raw(" | auto"));
    }

    let style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let paragraph = Paragraph::new(Line::from(spans)).style(style);

    frame.render_widget(paragraph, area);
}
