//! Inbound and outbound messages.
//!
//! Both directions are JSON objects internally tagged by `"type"`. The inbound
//! set is closed: tags this client does not know decode to
//! [`ServerMessage::Unknown`] so newer servers can add kinds without breaking
//! older clients. Known tags with missing or mistyped fields fail to decode.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Board, PlayerColor, ProtocolError};

/// Opaque server-issued game identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(String);

impl GameId {
    /// Wrap a raw identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identifier as sent by the server.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Full game snapshot carried by `start` and `rejoined`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStart {
    /// Game this snapshot belongs to.
    pub game_id: GameId,
    /// Opponent's username.
    pub opponent: String,
    /// Current board.
    pub board: Board,
    /// Colour assigned to this client.
    pub color: Option<PlayerColor>,
    /// Colour to move next.
    pub turn: Option<PlayerColor>,
}

/// Board refresh carried by `update`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameUpdate {
    /// Board after the move was applied.
    pub board: Board,
    /// Colour to move next.
    pub turn: Option<PlayerColor>,
    /// The move that produced this board, when the server reports it.
    #[serde(rename = "move", default, skip_serializing_if = "Option::is_none")]
    pub last_move: Option<LastMove>,
}

/// A disc placement reported alongside an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastMove {
    /// Row the disc landed in.
    pub row: usize,
    /// Column the disc was dropped into.
    pub col: usize,
    /// Colour of the player who moved.
    pub player: PlayerColor,
}

/// Messages sent by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerMessage {
    /// Player accepted into the matchmaking queue.
    Queued {
        /// Optional human-readable queue notice.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },

    /// A new game was formed. First authoritative snapshot.
    Start(GameStart),

    /// A move was applied. Board and turn refresh only.
    Update(GameUpdate),

    /// The game concluded.
    GameOver {
        /// Human-readable outcome, e.g. `"alice wins"` or `"Draw"`.
        result: String,
    },

    /// Out-of-band notice with no state effect.
    Info {
        /// Notice text.
        message: String,
    },

    /// Client reconnected mid-game and is being resynchronized.
    Rejoined(GameStart),

    /// Server refused a request, e.g. a rejoin for a finished game.
    Error {
        /// Error text.
        message: String,
    },

    /// Any tag this client does not recognize.
    #[serde(other)]
    Unknown,
}

impl ServerMessage {
    /// Decode a text frame.
    pub fn decode(text: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Encode as a text frame.
    pub fn encode(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Wire tag of this message, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Queued { .. } => "queued",
            Self::Start(_) => "start",
            Self::Update(_) => "update",
            Self::GameOver { .. } => "gameOver",
            Self::Info { .. } => "info",
            Self::Rejoined(_) => "rejoined",
            Self::Error { .. } => "error",
            Self::Unknown => "unknown",
        }
    }
}

/// Messages sent by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientMessage {
    /// Drop a disc into a column.
    Move {
        /// Zero-based column index.
        col: usize,
    },
}

impl ClientMessage {
    /// Encode as a text frame.
    pub fn encode(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode a text frame.
    pub fn decode(text: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(text)?)
    }
}
