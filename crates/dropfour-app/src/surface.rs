//! Board interaction surface.
//!
//! [`BoardSurface`] is a pure function of a snapshot: it lists one
//! [`CellElement`] per cell and turns a click on any cell into a
//! [`MoveIntent`] for that cell's column. It never checks whose turn it is or
//! whether the column is full; the session and the server own those rules.

use dropfour_client::{GameSnapshot, MoveIntent};
use dropfour_proto::{Cell, PlayerColor};

/// Visual class of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellClass {
    /// No disc.
    Empty,
    /// Red disc.
    Red,
    /// Yellow disc.
    Yellow,
}

impl From<Cell> for CellClass {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Empty => Self::Empty,
            Cell::Red => Self::Red,
            Cell::Yellow => Self::Yellow,
        }
    }
}

impl From<PlayerColor> for CellClass {
    fn from(color: PlayerColor) -> Self {
        match color {
            PlayerColor::Red => Self::Red,
            PlayerColor::Yellow => Self::Yellow,
        }
    }
}

/// One interactive board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellElement {
    /// Row index, top to bottom.
    pub row: usize,
    /// Column index, left to right.
    pub col: usize,
    /// Visual class derived from the cell value.
    pub class: CellClass,
}

/// Stateless view over an optional snapshot.
#[derive(Debug, Clone, Copy)]
pub struct BoardSurface<'a> {
    snapshot: Option<&'a GameSnapshot>,
}

impl<'a> BoardSurface<'a> {
    /// Surface for `snapshot`. An absent snapshot renders nothing.
    pub fn new(snapshot: Option<&'a GameSnapshot>) -> Self {
        Self { snapshot }
    }

    /// One element per cell in row-major order.
    ///
    /// Empty when there is no snapshot or the board has no rows.
    pub fn elements(&self) -> Vec<CellElement> {
        self.snapshot
            .map(|s| {
                s.board
                    .cells()
                    .map(|(row, col, cell)| CellElement { row, col, class: cell.into() })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Handle a click on `(row, col)`.
    ///
    /// Calls `on_move` with the clicked column for any cell inside the board,
    /// full or not, on either player's turn. Returns `false` and does nothing
    /// for a click outside the board.
    pub fn click(&self, row: usize, col: usize, on_move: impl FnOnce(MoveIntent)) -> bool {
        let inside = self.snapshot.is_some_and(|s| s.board.get(row, col).is_some());
        if inside {
            on_move(MoveIntent::new(col));
        }
        inside
    }

    /// Surface has something to draw.
    pub fn is_visible(&self) -> bool {
        self.snapshot.is_some_and(|s| s.board.row_count() > 0)
    }

    /// Board shape as `(rows, columns)`.
    pub fn dimensions(&self) -> (usize, usize) {
        self.snapshot.map_or((0, 0), |s| (s.board.row_count(), s.board.column_count()))
    }

    /// It is this client's turn.
    pub fn is_my_turn(&self) -> bool {
        self.snapshot.is_some_and(GameSnapshot::is_my_turn)
    }

    /// This client's colour.
    pub fn color(&self) -> Option<PlayerColor> {
        self.snapshot.and_then(|s| s.color)
    }

    /// Colour allowed to move next.
    pub fn turn(&self) -> Option<PlayerColor> {
        self.snapshot.and_then(|s| s.turn)
    }

    /// Header line naming this client's colour.
    pub fn color_label(&self) -> String {
        format!("Your color: {}", Self::code(self.color()))
    }

    /// Header line naming the colour to move.
    pub fn turn_label(&self) -> String {
        format!("Turn: {}", Self::code(self.turn()))
    }

    fn code(color: Option<PlayerColor>) -> &'static str {
        color.map_or("-", PlayerColor::code)
    }
}
