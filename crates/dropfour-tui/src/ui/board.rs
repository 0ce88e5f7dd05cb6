//! Game board
//!
//! Draws the [`BoardSurface`] of the current snapshot: a header naming the
//! opponent, this client's colour and the colour to move, a column ruler with
//! the keyboard cursor, and one three-character slot per cell.

use dropfour_app::{App, BoardSurface, CellClass};
use dropfour_client::ConnectionStatus;
use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Terminal columns per board cell.
const CELL_WIDTH: u16 = 3;
/// Blank column between the border and the first cell.
const LEFT_PADDING: u16 = 1;
/// Header, spacer and column ruler above the first row.
const ROWS_ABOVE_BOARD: u16 = 3;

const HELP: &str = "←/→ 1-9 select  Enter drop  r rejoin  n new game  l leaderboard  q quit";

/// Where board cells were drawn on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardGeometry {
    /// Left edge of column 0.
    x: u16,
    /// Top edge of row 0.
    y: u16,
    rows: usize,
    cols: usize,
    /// Visible region. Cells clipped by the terminal edge are not clickable.
    clip: Rect,
}

impl BoardGeometry {
    /// Board cell `(row, col)` under terminal position `(column, row)`.
    pub fn cell_at(&self, column: u16, row: u16) -> Option<(usize, usize)> {
        if !self.clip.contains(Position::new(column, row)) {
            return None;
        }

        let col = usize::from(column.checked_sub(self.x)? / CELL_WIDTH);
        let row = usize::from(row.checked_sub(self.y)?);
        (row < self.rows && col < self.cols).then_some((row, col))
    }

    /// Board shape as `(rows, columns)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }
}

fn disc(class: CellClass) -> (&'static str, Style) {
    match class {
        CellClass::Empty => (" · ", Style::default().fg(Color::DarkGray)),
        CellClass::Red => (" ● ", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
        CellClass::Yellow => {
            (" ● ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        },
    }
}

fn color_span(label: String, class: Option<CellClass>) -> Span<'static> {
    match class {
        Some(class) => Span::styled(label, disc(class).1),
        None => Span::raw(label),
    }
}

/// Render the board area.
pub fn render(frame: &mut Frame, app: &App, area: Rect) -> Option<BoardGeometry> {
    let session = app.session();
    let title =
        session.game_id.as_ref().map_or_else(|| " Board ".to_string(), |id| format!(" Game {id} "));
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);

    let surface = app.surface();
    if !surface.is_visible() {
        let paragraph = Paragraph::new(Line::from(Span::styled(
            "Waiting for the game to start",
            Style::default().fg(Color::DarkGray),
        )))
        .block(block);
        frame.render_widget(paragraph, area);
        return None;
    }

    let (rows, cols) = surface.dimensions();
    let mut lines = Vec::with_capacity(rows + 6);

    lines.push(header(app, surface));
    lines.push(Line::default());
    lines.push(ruler(cols, app.cursor()));

    let last_move = session.last_move.map(|m| (m.row, m.col));
    let mut row_spans: Vec<Vec<Span>> = vec![vec![Span::raw(" ")]; rows];
    for element in surface.elements() {
        let (symbol, mut style) = disc(element.class);
        if last_move == Some((element.row, element.col)) {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        if let Some(spans) = row_spans.get_mut(element.row) {
            spans.push(Span::styled(symbol, style));
        }
    }
    lines.extend(row_spans.into_iter().map(Line::from));

    lines.push(Line::default());
    if session.status == ConnectionStatus::Ended {
        let result = session.result.as_deref().unwrap_or("finished");
        lines.push(Line::from(Span::styled(
            format!("Result: {result}"),
            Style::default().add_modifier(Modifier::BOLD),
        )));
    }
    lines.push(Line::from(Span::styled(HELP, Style::default().fg(Color::DarkGray))));

    frame.render_widget(Paragraph::new(lines).block(block), area);

    Some(BoardGeometry {
        x: inner.x.saturating_add(LEFT_PADDING),
        y: inner.y.saturating_add(ROWS_ABOVE_BOARD),
        rows,
        cols,
        clip: inner,
    })
}

/// Opponent, colours and whose move it is.
fn header(app: &App, surface: BoardSurface<'_>) -> Line<'static> {
    let opponent = app.session().opponent.clone().unwrap_or_else(|| "?".into());
    let mut spans = vec![
        Span::raw(format!(" Opponent: {opponent}   ")),
        color_span(surface.color_label(), surface.color().map(CellClass::from)),
        Span::raw("   "),
        color_span(surface.turn_label(), surface.turn().map(CellClass::from)),
    ];
    if app.session().accepts_moves() && surface.is_my_turn() {
        spans.push(Span::styled(
            "  (your move)",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ));
    }
    Line::from(spans)
}

/// Column numbers with the cursor column highlighted.
fn ruler(cols: usize, cursor: usize) -> Line<'static> {
    let mut spans = vec![Span::raw(" ")];
    spans.extend((0..cols).map(|col| {
        let label = format!("{:^3}", col + 1);
        if col == cursor {
            Span::styled(label, Style::default().add_modifier(Modifier::REVERSED))
        } else {
            Span::styled(label, Style::default().fg(Color::DarkGray))
        }
    }));
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> BoardGeometry {
        BoardGeometry { x: 2, y: 4, rows: 6, cols: 7, clip: Rect::new(1, 1, 40, 20) }
    }

    #[test]
    fn maps_positions_to_cells() {
        let g = geometry();
        assert_eq!(g.cell_at(2, 4), Some((0, 0)));
        assert_eq!(g.cell_at(4, 4), Some((0, 0)));
        assert_eq!(g.cell_at(5, 4), Some((0, 1)));
        assert_eq!(g.cell_at(22, 9), Some((5, 6)));
    }

    #[test]
    fn ignores_positions_off_the_board() {
        let g = geometry();
        // Padding column and ruler row
        assert_eq!(g.cell_at(1, 4), None);
        assert_eq!(g.cell_at(2, 3), None);
        // Past the last column and row
        assert_eq!(g.cell_at(23, 4), None);
        assert_eq!(g.cell_at(2, 10), None);
    }

    #[test]
    fn clipped_cells_are_not_clickable() {
        let g = BoardGeometry { clip: Rect::new(1, 1, 10, 5), ..geometry() };
        assert_eq!(g.cell_at(5, 4), Some((0, 1)));
        assert_eq!(g.cell_at(14, 4), None);
        assert_eq!(g.cell_at(2, 6), None);
    }
}
