//! Automatic move selection.
//!
//! Plays the first open column in centre-out order. Not a strategy, just a
//! way to keep a game moving when the player runs unattended.

use dropfour_proto::Board;

/// Preferred columns for a seven-column board.
const CENTRE_OUT: [usize; 7] = [3, 2, 4, 1, 5, 0, 6];

/// First playable column, or `None` if every column is full.
///
/// Columns from the centre-out order that exist on this board come first,
/// then any other non-full column left to right.
pub fn choose_column(board: &Board) -> Option<usize> {
    let columns = board.column_count();
    CENTRE_OUT
        .into_iter()
        .filter(|&c| c < columns)
        .chain(0..columns)
        .find(|&c| !board.is_column_full(c))
}
