//! Observable state snapshots for invariant checking.
//!
//! Snapshots capture the observable state of the system at a point in time.
//! Invariants operate on snapshots rather than live state to ensure
//! consistent, atomic checks.

use dropfour_app::App;
use dropfour_client::{ConnectionStatus, Session};
use dropfour_proto::{GameId, PlayerColor};

/// Snapshot of the entire system state.
///
/// Contains observable state from one or more clients for invariant checking.
#[derive(Debug, Clone, Default)]
pub struct SystemSnapshot {
    /// Per-client state snapshots.
    pub clients: Vec<ClientSnapshot>,
}

impl SystemSnapshot {
    /// Create an empty snapshot (no clients).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a snapshot with a single client.
    pub fn single(client: ClientSnapshot) -> Self {
        Self { clients: vec![client] }
    }

    /// Create a snapshot from multiple clients.
    pub fn from_clients(clients: Vec<ClientSnapshot>) -> Self {
        Self { clients }
    }

    /// Add a client snapshot.
    pub fn add_client(&mut self, client: ClientSnapshot) {
        self.clients.push(client);
    }
}

/// Snapshot of a single client's observable state.
#[derive(Debug, Clone, Default)]
pub struct ClientSnapshot {
    /// Client identifier.
    pub id: u64,
    /// Connection status.
    pub status: ConnectionStatus,
    /// Current game. `None` before a game starts.
    pub game_id: Option<GameId>,
    /// Board shape as `(rows, columns)`. `None` without a snapshot.
    pub board_shape: Option<(usize, usize)>,
    /// This client's colour in the current game.
    pub color: Option<PlayerColor>,
    /// Outcome of the finished game.
    pub result: Option<String>,
    /// Column cursor. Always 0 for a bare session.
    pub cursor: usize,
    /// Entries in the notice log.
    pub notice_count: usize,
    /// Every `(game, colour)` pair observed so far.
    pub color_history: Vec<(GameId, PlayerColor)>,
}

impl ClientSnapshot {
    /// Create a new client snapshot.
    pub fn new(id: u64) -> Self {
        Self { id, ..Default::default() }
    }

    /// Capture the state an [`App`] renders.
    pub fn from_app(id: u64, app: &App) -> Self {
        let view = app.session();
        let snapshot = view.snapshot.as_ref();
        Self {
            id,
            status: view.status,
            game_id: view.game_id.clone(),
            board_shape: snapshot.map(|s| (s.board.row_count(), s.board.column_count())),
            color: snapshot.and_then(|s| s.color),
            result: view.result.clone(),
            cursor: app.cursor(),
            notice_count: app.notices().len(),
            color_history: Vec::new(),
        }
    }

    /// Capture the state a [`Session`] exposes.
    pub fn from_session(id: u64, session: &Session) -> Self {
        let snapshot = session.snapshot();
        Self {
            id,
            status: session.status(),
            game_id: session.game_id().cloned(),
            board_shape: snapshot.map(|s| (s.board.row_count(), s.board.column_count())),
            color: snapshot.and_then(|s| s.color),
            result: session.result().map(str::to_owned),
            cursor: 0,
            notice_count: 0,
            color_history: Vec::new(),
        }
    }

    /// Attach the colour observations recorded so far.
    #[must_use]
    pub fn with_color_history(mut self, history: Vec<(GameId, PlayerColor)>) -> Self {
        self.color_history = history;
        self
    }

    /// Record the current `(game, colour)` pair, if both are known.
    pub fn record_color(&mut self) {
        if let (Some(game_id), Some(color)) = (&self.game_id, self.color) {
            self.color_history.push((game_id.clone(), color));
        }
    }
}

#[cfg(test)]
mod tests {
    use dropfour_client::SessionEvent;
    use dropfour_proto::{Board, GameStart, ServerMessage};

    use super::*;

    #[test]
    fn empty_snapshot() {
        let snapshot = SystemSnapshot::empty();
        assert!(snapshot.clients.is_empty());
    }

    #[test]
    fn session_snapshot_reflects_start() {
        let mut session = Session::new("alice");
        let _ = session.connect();
        let _ = session.handle(SessionEvent::Opened);
        let _ = session.handle(SessionEvent::Message(ServerMessage::Start(GameStart {
            game_id: GameId::new("g1"),
            opponent: "bob".into(),
            board: Board::empty(6, 7),
            color: Some(PlayerColor::Yellow),
            turn: Some(PlayerColor::Red),
        })));

        let mut client = ClientSnapshot::from_session(3, &session);
        client.record_color();

        assert_eq!(client.id, 3);
        assert_eq!(client.status, ConnectionStatus::Playing);
        assert_eq!(client.board_shape, Some((6, 7)));
        assert_eq!(client.color_history, vec![(GameId::new("g1"), PlayerColor::Yellow)]);
    }

    #[test]
    fn app_snapshot_before_login() {
        let client = ClientSnapshot::from_app(0, &App::new(false));
        assert_eq!(client.status, ConnectionStatus::Connecting);
        assert_eq!(client.board_shape, None);
        assert!(client.color_history.is_empty());
    }
}
