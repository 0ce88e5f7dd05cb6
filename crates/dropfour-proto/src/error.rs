//! Protocol errors.

use thiserror::Error;

/// Errors produced while encoding or decoding protocol messages.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Payload is not valid JSON or does not match any message shape.
    #[error("malformed message: {0}")]
    Json(#[from] serde_json::Error),

    /// Board rows differ in length.
    #[error("ragged board: row {row} has {found} cells, expected {expected}")]
    RaggedBoard {
        /// Index of the first offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },
}
