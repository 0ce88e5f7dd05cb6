//! Observable session state.
//!
//! These types are the session's "view model": what a host renders and what
//! gates user input. They hold only server-announced values; the client never
//! edits a board locally.

use std::fmt;

use dropfour_proto::{Board, GameId, GameStart, GameUpdate, PlayerColor};

/// Connection status. Exactly one value is held at any instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConnectionStatus {
    /// Socket requested, not yet open.
    #[default]
    Connecting,
    /// Socket open, waiting to be matched.
    Waiting,
    /// In a game.
    Playing,
    /// Reconnected mid-game and resynchronized by the server.
    Rejoined,
    /// Game finished.
    Ended,
    /// Socket closed, for any reason.
    Disconnected,
}

impl ConnectionStatus {
    /// Every status, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Connecting,
        Self::Waiting,
        Self::Playing,
        Self::Rejoined,
        Self::Ended,
        Self::Disconnected,
    ];

    /// Lower-case label for display and logs.
    pub fn label(self) -> &'static str {
        match self {
            Self::Connecting => "connecting",
            Self::Waiting => "waiting",
            Self::Playing => "playing",
            Self::Rejoined => "rejoined",
            Self::Ended => "ended",
            Self::Disconnected => "disconnected",
        }
    }

    /// A game snapshot is live in this status.
    pub fn in_game(self) -> bool {
        matches!(self, Self::Playing | Self::Rejoined)
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Last authoritative board, turn and colour.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameSnapshot {
    /// Board exactly as last sent by the server.
    pub board: Board,
    /// Colour allowed to move next.
    pub turn: Option<PlayerColor>,
    /// This client's colour, fixed for the lifetime of a game.
    pub color: Option<PlayerColor>,
}

impl GameSnapshot {
    /// It is this client's turn.
    pub fn is_my_turn(&self) -> bool {
        self.color.is_some() && self.turn == self.color
    }

    /// Replace board and turn, leaving colour untouched.
    pub(crate) fn refresh(&mut self, update: GameUpdate) {
        self.board = update.board;
        self.turn = update.turn;
    }
}

impl From<GameStart> for GameSnapshot {
    fn from(start: GameStart) -> Self {
        Self { board: start.board, turn: start.turn, color: start.color }
    }
}

/// Identity of the current game.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionIdentity {
    /// Set once per game and retained across a rejoin.
    pub game_id: Option<GameId>,
    /// Opponent's username. Refreshed on rejoin.
    pub opponent: Option<String>,
}

/// Request to drop a disc into a column. Advisory until the server confirms
/// it with the next snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveIntent {
    /// Zero-based column index.
    pub column: usize,
}

impl MoveIntent {
    /// Intent for the given column.
    pub fn new(column: usize) -> Self {
        Self { column }
    }
}
