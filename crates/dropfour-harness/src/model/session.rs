//! Model session state machine.
//!
//! Simplified session that tracks only what a player can observe. Status
//! changes come from a literal edge list rather than the production match.

use dropfour_client::{ConnectionStatus, Session};
use dropfour_proto::{Board, GameId, PlayerColor, ServerMessage};

use super::Operation;

/// What can drive a status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trigger {
    Opened,
    Queued,
    Start,
    Update,
    GameOver,
    Rejoined,
}

impl Trigger {
    /// Trigger for `message`. `None` for notices and unknown kinds.
    fn of(message: &ServerMessage) -> Option<Self> {
        match message {
            ServerMessage::Queued { .. } => Some(Self::Queued),
            ServerMessage::Start(_) => Some(Self::Start),
            ServerMessage::Update(_) => Some(Self::Update),
            ServerMessage::GameOver { .. } => Some(Self::GameOver),
            ServerMessage::Rejoined(_) => Some(Self::Rejoined),
            ServerMessage::Info { .. } | ServerMessage::Error { .. } | ServerMessage::Unknown => {
                None
            },
        }
    }
}

/// Every accepted `(from, trigger, to)`. Closing is accepted from anywhere.
const EDGES: &[(ConnectionStatus, Trigger, ConnectionStatus)] = &[
    (ConnectionStatus::Connecting, Trigger::Opened, ConnectionStatus::Waiting),
    (ConnectionStatus::Waiting, Trigger::Queued, ConnectionStatus::Waiting),
    (ConnectionStatus::Waiting, Trigger::Start, ConnectionStatus::Playing),
    (ConnectionStatus::Playing, Trigger::Update, ConnectionStatus::Playing),
    (ConnectionStatus::Rejoined, Trigger::Update, ConnectionStatus::Playing),
    (ConnectionStatus::Playing, Trigger::GameOver, ConnectionStatus::Ended),
    (ConnectionStatus::Rejoined, Trigger::GameOver, ConnectionStatus::Ended),
    (ConnectionStatus::Connecting, Trigger::Rejoined, ConnectionStatus::Rejoined),
    (ConnectionStatus::Waiting, Trigger::Rejoined, ConnectionStatus::Rejoined),
    (ConnectionStatus::Disconnected, Trigger::Rejoined, ConnectionStatus::Rejoined),
];

/// Observable session state, compared between model and implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservableState {
    /// Connection status.
    pub status: ConnectionStatus,
    /// Socket is open.
    pub open: bool,
    /// Teardown has been requested.
    pub torn_down: bool,
    /// Current game.
    pub game_id: Option<GameId>,
    /// Opponent's username.
    pub opponent: Option<String>,
    /// Last board sent by the server.
    pub board: Option<Board>,
    /// Colour to move.
    pub turn: Option<PlayerColor>,
    /// This client's colour.
    pub color: Option<PlayerColor>,
    /// Outcome of the finished game.
    pub result: Option<String>,
}

impl ObservableState {
    /// Observable state of a real session.
    pub fn of(session: &Session) -> Self {
        let snapshot = session.snapshot();
        Self {
            status: session.status(),
            open: session.is_open(),
            torn_down: session.is_torn_down(),
            game_id: session.game_id().cloned(),
            opponent: session.opponent().map(str::to_owned),
            board: snapshot.map(|s| s.board.clone()),
            turn: snapshot.and_then(|s| s.turn),
            color: snapshot.and_then(|s| s.color),
            result: session.result().map(str::to_owned),
        }
    }
}

/// Reference session.
#[derive(Debug, Clone)]
pub struct ModelSession {
    state: ObservableState,
}

impl Default for ModelSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelSession {
    /// Model of a session that has requested its socket.
    pub fn new() -> Self {
        Self {
            state: ObservableState {
                status: ConnectionStatus::Connecting,
                open: false,
                torn_down: false,
                game_id: None,
                opponent: None,
                board: None,
                turn: None,
                color: None,
                result: None,
            },
        }
    }

    /// Current observable state.
    pub fn observable(&self) -> &ObservableState {
        &self.state
    }

    /// Apply an operation.
    ///
    /// Returns `true` when the operation is a move the session must send.
    pub fn apply(&mut self, op: &Operation) -> bool {
        if self.state.torn_down {
            return false;
        }

        match op {
            Operation::Open => {
                if let Some(next) = self.next(Trigger::Opened) {
                    self.state.status = next;
                    self.state.open = true;
                }
                false
            },
            Operation::Receive(message) => {
                self.receive(message);
                false
            },
            Operation::SubmitMove { .. } => {
                self.state.open && self.state.status == ConnectionStatus::Playing
            },
            Operation::Close => {
                self.state.status = ConnectionStatus::Disconnected;
                self.state.open = false;
                false
            },
            Operation::Teardown => {
                self.state.torn_down = true;
                self.state.status = ConnectionStatus::Disconnected;
                self.state.open = false;
                false
            },
        }
    }

    fn next(&self, trigger: Trigger) -> Option<ConnectionStatus> {
        EDGES
            .iter()
            .find(|(from, t, _)| *from == self.state.status && *t == trigger)
            .map(|(_, _, to)| *to)
    }

    fn receive(&mut self, message: &ServerMessage) {
        let Some(next) = Trigger::of(message).and_then(|t| self.next(t)) else {
            return;
        };

        match message {
            ServerMessage::Start(start) | ServerMessage::Rejoined(start) => {
                self.state.game_id = Some(start.game_id.clone());
                self.state.opponent = Some(start.opponent.clone());
                self.state.board = Some(start.board.clone());
                self.state.turn = start.turn;
                self.state.color = start.color;
                self.state.result = None;
            },
            ServerMessage::Update(update) => {
                self.state.board = Some(update.board.clone());
                self.state.turn = update.turn;
            },
            ServerMessage::GameOver { result } => self.state.result = Some(result.clone()),
            _ => {},
        }
        self.state.status = next;
    }
}
