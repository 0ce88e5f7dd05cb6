//! Leaderboard panel
//!
//! Displays the standings fetched from the server, in server order.

use dropfour_proto::LeaderboardEntry;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

const NAME_WIDTH: usize = 14;

/// Render the leaderboard panel.
pub fn render(frame: &mut Frame, entries: &[LeaderboardEntry], area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Leaderboard ");

    let items: Vec<ListItem> = if entries.is_empty() {
        vec![ListItem::new(Line::from(Span::styled(
            "No results yet",
            Style::default().fg(Color::DarkGray),
        )))]
    } else {
        entries
            .iter()
            .enumerate()
            .map(|(rank, entry)| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:>2}. ", rank + 1),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(
                        format!("{:<NAME_WIDTH$.NAME_WIDTH$}", entry.username),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(format!(" W{} D{} L{}", entry.wins, entry.draws, entry.losses)),
                ]))
            })
            .collect()
    };

    frame.render_widget(List::new(items).block(block), area);
}
