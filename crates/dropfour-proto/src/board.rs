//! Board, cell and colour types.
//!
//! The board is a row-major grid sent by the server after every move. Its
//! dimensions are server-defined: nothing here assumes six rows or seven
//! columns. Cells travel as JSON `null` (empty) or a colour string.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ProtocolError;

/// Colour assigned to a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerColor {
    /// Red, encoded as `"R"`. Red moves first.
    #[serde(rename = "R")]
    Red,
    /// Yellow, encoded as `"Y"`.
    #[serde(rename = "Y")]
    Yellow,
}

impl PlayerColor {
    /// The other colour.
    pub fn opponent(self) -> Self {
        match self {
            Self::Red => Self::Yellow,
            Self::Yellow => Self::Red,
        }
    }

    /// Wire code (`"R"` or `"Y"`).
    pub fn code(self) -> &'static str {
        match self {
            Self::Red => "R",
            Self::Yellow => "Y",
        }
    }
}

impl fmt::Display for PlayerColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<PlayerColor>", into = "Option<PlayerColor>")]
pub enum Cell {
    /// No disc.
    #[default]
    Empty,
    /// Red disc.
    Red,
    /// Yellow disc.
    Yellow,
}

impl Cell {
    /// Colour of the disc in this cell. `None` if empty.
    pub fn color(self) -> Option<PlayerColor> {
        self.into()
    }

    /// Cell holds no disc.
    pub fn is_empty(self) -> bool {
        self == Self::Empty
    }
}

impl From<Option<PlayerColor>> for Cell {
    fn from(color: Option<PlayerColor>) -> Self {
        match color {
            None => Self::Empty,
            Some(PlayerColor::Red) => Self::Red,
            Some(PlayerColor::Yellow) => Self::Yellow,
        }
    }
}

impl From<Cell> for Option<PlayerColor> {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Empty => None,
            Cell::Red => Some(PlayerColor::Red),
            Cell::Yellow => Some(PlayerColor::Yellow),
        }
    }
}

/// Rectangular grid of cells, row 0 at the top.
///
/// Construction rejects ragged rows so every consumer can index by
/// `(row, col)` without re-checking shape. A board with zero rows is valid and
/// represents "nothing to draw yet".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Cell>>", into = "Vec<Vec<Cell>>")]
pub struct Board {
    rows: Vec<Vec<Cell>>,
}

impl Board {
    /// Build a board from rows, rejecting rows of unequal length.
    pub fn new(rows: Vec<Vec<Cell>>) -> Result<Self, ProtocolError> {
        if let Some(first) = rows.first() {
            let expected = first.len();
            if let Some((row, found)) =
                rows.iter().map(Vec::len).enumerate().find(|&(_, len)| len != expected)
            {
                return Err(ProtocolError::RaggedBoard { row, expected, found });
            }
        }
        Ok(Self { rows })
    }

    /// Board of the given shape with every cell empty.
    pub fn empty(rows: usize, columns: usize) -> Self {
        Self { rows: vec![vec![Cell::Empty; columns]; rows] }
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns. Zero for a board without rows.
    pub fn column_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Board has no cells at all.
    pub fn is_empty(&self) -> bool {
        self.row_count() == 0 || self.column_count() == 0
    }

    /// Cell at `(row, col)`. `None` if out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Rows, top to bottom.
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Every cell in row-major order with its coordinates.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.rows.iter().enumerate().flat_map(|(r, row)| {
            row.iter().enumerate().map(move |(c, cell)| (r, c, *cell))
        })
    }

    /// Column has no empty cell left in its top row.
    ///
    /// Out-of-range columns count as full.
    pub fn is_column_full(&self, col: usize) -> bool {
        self.get(0, col).is_none_or(|cell| !cell.is_empty())
    }
}

impl TryFrom<Vec<Vec<Cell>>> for Board {
    type Error = ProtocolError;

    fn try_from(rows: Vec<Vec<Cell>>) -> Result<Self, Self::Error> {
        Self::new(rows)
    }
}

impl From<Board> for Vec<Vec<Cell>> {
    fn from(board: Board) -> Self {
        board.rows
    }
}
