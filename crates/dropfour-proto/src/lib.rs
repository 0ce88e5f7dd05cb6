//! Protocol
//!
//! Message types exchanged between a dropfour client and the matchmaking
//! server. Every message is a JSON text frame tagged by its `"type"` field.
//!
//! # Components
//!
//! - [`ServerMessage`]: closed set of inbound messages, with an explicit
//!   [`ServerMessage::Unknown`] fallback for tags this client does not know
//! - [`ClientMessage`]: outbound messages (moves)
//! - [`Board`], [`Cell`], [`PlayerColor`]: the server-authoritative grid
//! - [`LeaderboardEntry`]: rows of the leaderboard read service
//!
//! Decoding never panics. Anything the decoder rejects surfaces as a
//! [`ProtocolError`] which callers are expected to log and drop.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod board;
mod error;
mod leaderboard;
mod message;

pub use board::{Board, Cell, PlayerColor};
pub use error::ProtocolError;
pub use leaderboard::LeaderboardEntry;
pub use message::{ClientMessage, GameId, GameStart, GameUpdate, LastMove, ServerMessage};
