//! Notice log
//!
//! Server notices and game results, newest at the bottom.

use dropfour_app::NoticeLog;
use ratatui::{
    Frame,
    layout::Rect,
    widgets::{Block, Borders, List, ListItem},
};

const BORDER_SIZE: u16 = 2;

/// Render the notice log.
pub fn render(frame: &mut Frame, notices: &NoticeLog, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Notices ");

    let visible_height = area.height.saturating_sub(BORDER_SIZE) as usize;
    let skip = notices.len().saturating_sub(visible_height);
    let items: Vec<ListItem> =
        notices.iter().skip(skip).map(|text| ListItem::new(text.to_owned())).collect();

    frame.render_widget(List::new(items).block(block), area);
}
