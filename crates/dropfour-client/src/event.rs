//! Session events and actions.

use std::fmt;

use dropfour_proto::{ClientMessage, GameId, ServerMessage};

/// Events the caller feeds into the session.
///
/// The caller is responsible for:
/// - Reporting when the socket opens and closes
/// - Decoding inbound frames and forwarding them in delivery order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Socket handshake completed.
    Opened,
    /// Decoded message from the server.
    Message(ServerMessage),
    /// Socket closed: network failure, server close, or local teardown.
    Closed,
}

impl SessionEvent {
    /// Short name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Opened => "opened",
            Self::Message(message) => message.kind(),
            Self::Closed => "closed",
        }
    }
}

/// Actions the session asks the caller to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    /// Open a socket for this request.
    Connect(ConnectRequest),
    /// Send a message on the open socket.
    Send(ClientMessage),
    /// Close the socket.
    Close,
    /// Show a notification to the player.
    Notify(Notice),
    /// Exposed state changed; re-render.
    Render,
}

/// Parameters of a socket connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectRequest {
    /// Player identity, sent as the `username` query parameter.
    pub username: String,
    /// Game to rejoin, sent as the `gameId` query parameter.
    pub game_id: Option<GameId>,
}

/// Notification surfaced to the player. Never changes session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Server notice (e.g. opponent disconnected).
    Info(String),
    /// Server refused a request.
    Error(String),
    /// Game finished with this outcome.
    GameOver(String),
}

impl Notice {
    /// Text shown to the player.
    pub fn text(&self) -> &str {
        match self {
            Self::Info(text) | Self::Error(text) | Self::GameOver(text) => text,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info(text) => write!(f, "{text}"),
            Self::Error(text) => write!(f, "Error: {text}"),
            Self::GameOver(text) => write!(f, "Game over: {text}"),
        }
    }
}
