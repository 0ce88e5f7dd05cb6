//! Login form
//!
//! Username entry with cursor.

use dropfour_app::LineEditor;
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

const FORM_WIDTH: u16 = 40;
const FORM_HEIGHT: u16 = 6;
const PROMPT_WIDTH: u16 = 3; // " > "
const INPUT_LINE_OFFSET_Y: u16 = 2; // border + label
const RIGHT_PADDING: u16 = 1; // inside right border

/// Render the login form centred in `area`.
pub fn render(frame: &mut Frame, input: &LineEditor, area: Rect) {
    let [row] = Layout::vertical([Constraint::Length(FORM_HEIGHT)]).flex(Flex::Center).areas(area);
    let [form] = Layout::horizontal([Constraint::Length(FORM_WIDTH)]).flex(Flex::Center).areas(row);

    let block = Block::default().borders(Borders::ALL).title(" dropfour ");
    let lines = vec![
        Line::from(" Username"),
        Line::from(format!(" > {}", input.buffer())),
        Line::default(),
        Line::styled(" Enter to play, Esc to quit", Style::default().fg(Color::DarkGray)),
    ];
    frame.render_widget(Paragraph::new(lines).block(block), form);

    let available_width = form.width.saturating_sub(PROMPT_WIDTH + RIGHT_PADDING + 1);
    let cursor_offset = (input.cursor() as u16).min(available_width);

    let cursor_x = form.x.saturating_add(1 + PROMPT_WIDTH).saturating_add(cursor_offset);
    let cursor_y = form.y.saturating_add(INPUT_LINE_OFFSET_Y);

    frame.set_cursor_position((cursor_x, cursor_y));
}
