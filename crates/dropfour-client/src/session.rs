//! Game session state machine.
//!
//! [`Session`] owns the client's view of one connection for its whole
//! lifetime: opened once, driven by events in transport order, torn down once.
//! A new identity means a new session, never a reused one.

use dropfour_proto::{ClientMessage, GameId, LastMove, ServerMessage};

use crate::{
    ConnectRequest, ConnectionStatus, GameSnapshot, MoveIntent, Notice, SessionAction,
    SessionEvent, SessionIdentity, transition,
};

/// Game session state machine.
///
/// Pure state machine that processes [`SessionEvent`]s and produces
/// [`SessionAction`]s. No I/O dependencies.
///
/// # Invariants
///
/// - `status` changes only through [`transition`] or [`Session::teardown`].
/// - `snapshot` is replaced only by accepted `start`, `rejoined` and `update`
///   messages; `update` never changes `color`.
/// - After teardown every event is ignored.
#[derive(Debug, Clone)]
pub struct Session {
    /// Player identity supplied by the host.
    username: String,
    /// Game to present when connecting, for a rejoin.
    resume_game: Option<GameId>,
    /// Connection status.
    status: ConnectionStatus,
    /// Last authoritative snapshot. `None` before the first `start`/`rejoined`.
    snapshot: Option<GameSnapshot>,
    /// Game identity.
    identity: SessionIdentity,
    /// Outcome from `gameOver`.
    result: Option<String>,
    /// Move reported with the latest update.
    last_move: Option<LastMove>,
    /// Latest queue notice from `queued`.
    queue_message: Option<String>,
    /// `Connect` has been emitted.
    connect_requested: bool,
    /// Socket is open.
    open: bool,
    /// Teardown has been requested.
    torn_down: bool,
}

impl Session {
    /// Create a session for `username`. Does not connect.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            resume_game: None,
            status: ConnectionStatus::Connecting,
            snapshot: None,
            identity: SessionIdentity::default(),
            result: None,
            last_move: None,
            queue_message: None,
            connect_requested: false,
            open: false,
            torn_down: false,
        }
    }

    /// Create a session that asks the server to rejoin `game_id`.
    pub fn resume(username: impl Into<String>, game_id: GameId) -> Self {
        Self { resume_game: Some(game_id), ..Self::new(username) }
    }

    /// Request the socket.
    ///
    /// Emits exactly one [`SessionAction::Connect`] over the session's
    /// lifetime. A blank username leaves the session uninitialized.
    pub fn connect(&mut self) -> Vec<SessionAction> {
        if self.torn_down || self.connect_requested {
            return vec![];
        }
        if self.username.trim().is_empty() {
            tracing::debug!("blank username, not connecting");
            return vec![];
        }

        self.connect_requested = true;
        tracing::info!(username = %self.username, game_id = ?self.resume_game, "connecting");

        vec![
            SessionAction::Connect(ConnectRequest {
                username: self.username.clone(),
                game_id: self.resume_game.clone(),
            }),
            SessionAction::Render,
        ]
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: SessionEvent) -> Vec<SessionAction> {
        if self.torn_down {
            tracing::debug!(event = event.kind(), "session torn down, dropping event");
            return vec![];
        }

        // A socket this session never asked for cannot open it.
        let next = transition(self.status, &event)
            .filter(|_| self.connect_requested || !matches!(event, SessionEvent::Opened));
        let mut actions = Vec::new();

        match event {
            SessionEvent::Opened => self.open |= next.is_some(),
            SessionEvent::Closed => self.open = false,
            SessionEvent::Message(message) => {
                if next.is_none() && !Self::is_notice(&message) {
                    tracing::debug!(
                        kind = message.kind(),
                        status = %self.status,
                        "ignoring message"
                    );
                }
                self.apply(message, next.is_some(), &mut actions);
            },
        }

        if let Some(status) = next {
            if status != self.status {
                tracing::info!(from = %self.status, to = %status, "session status changed");
            }
            self.status = status;
            actions.push(SessionAction::Render);
        }

        actions
    }

    /// Submit a move for the current game.
    ///
    /// Returns a single [`SessionAction::Send`] when the socket is open and
    /// the status is [`ConnectionStatus::Playing`]; otherwise nothing. Never
    /// queues or retries.
    pub fn submit_move(&self, intent: MoveIntent) -> Vec<SessionAction> {
        if self.torn_down || !self.open || self.status != ConnectionStatus::Playing {
            tracing::debug!(
                column = intent.column,
                status = %self.status,
                open = self.open,
                "move dropped by gate"
            );
            return vec![];
        }

        vec![SessionAction::Send(ClientMessage::Move { col: intent.column })]
    }

    /// Tear the session down.
    ///
    /// Emits [`SessionAction::Close`] at most once, and only if a socket was
    /// requested. Afterwards the status is `disconnected` and frozen.
    pub fn teardown(&mut self) -> Vec<SessionAction> {
        if self.torn_down {
            return vec![];
        }

        self.torn_down = true;
        self.open = false;
        self.status = ConnectionStatus::Disconnected;
        tracing::info!(username = %self.username, "session torn down");

        if self.connect_requested {
            vec![SessionAction::Close, SessionAction::Render]
        } else {
            vec![SessionAction::Render]
        }
    }

    fn is_notice(message: &ServerMessage) -> bool {
        matches!(message, ServerMessage::Info { .. } | ServerMessage::Error { .. })
    }

    fn apply(&mut self, message: ServerMessage, accepted: bool, actions: &mut Vec<SessionAction>) {
        match message {
            ServerMessage::Info { message } => {
                actions.push(SessionAction::Notify(Notice::Info(message)));
                actions.push(SessionAction::Render);
            },
            ServerMessage::Error { message } => {
                tracing::warn!(%message, "server error");
                actions.push(SessionAction::Notify(Notice::Error(message)));
                actions.push(SessionAction::Render);
            },
            ServerMessage::Unknown => {
                tracing::debug!("ignoring unknown message kind");
            },
            _ if !accepted => {},
            ServerMessage::Queued { message } => {
                if message.is_some() {
                    self.queue_message = message;
                }
            },
            ServerMessage::Start(start) | ServerMessage::Rejoined(start) => {
                self.identity.game_id = Some(start.game_id.clone());
                self.identity.opponent = Some(start.opponent.clone());
                self.last_move = None;
                self.result = None;
                self.snapshot = Some(start.into());
            },
            ServerMessage::Update(update) => {
                if let Some(snapshot) = self.snapshot.as_mut() {
                    self.last_move = update.last_move;
                    snapshot.refresh(update);
                }
            },
            ServerMessage::GameOver { result } => {
                self.result = Some(result.clone());
                actions.push(SessionAction::Notify(Notice::GameOver(result)));
            },
        }
    }

    /// Player identity.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Current connection status.
    pub fn status(&self) -> ConnectionStatus {
        self.status
    }

    /// Last authoritative snapshot. `None` before a game starts.
    pub fn snapshot(&self) -> Option<&GameSnapshot> {
        self.snapshot.as_ref()
    }

    /// Game identity.
    pub fn identity(&self) -> &SessionIdentity {
        &self.identity
    }

    /// Current game. `None` before a game starts.
    pub fn game_id(&self) -> Option<&GameId> {
        self.identity.game_id.as_ref()
    }

    /// Opponent's username. `None` before a game starts.
    pub fn opponent(&self) -> Option<&str> {
        self.identity.opponent.as_deref()
    }

    /// Outcome of the finished game. `None` until `gameOver`.
    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    /// Move reported with the latest update.
    pub fn last_move(&self) -> Option<LastMove> {
        self.last_move
    }

    /// Latest queue notice.
    pub fn queue_message(&self) -> Option<&str> {
        self.queue_message.as_deref()
    }

    /// Socket is open.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// `Connect` has been emitted. `false` for a blank username.
    pub fn is_initialized(&self) -> bool {
        self.connect_requested
    }

    /// Teardown has been requested.
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// The session can be resumed with a rejoin: it knows a game that had not
    /// finished when the socket dropped.
    pub fn rejoinable_game(&self) -> Option<&GameId> {
        if self.result.is_some() || self.status != ConnectionStatus::Disconnected {
            return None;
        }
        self.game_id()
    }
}
