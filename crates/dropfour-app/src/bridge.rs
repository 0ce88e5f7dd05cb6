//! Protocol-to-Application translation layer.
//!
//! The [`Bridge`] owns the [`dropfour_client::Session`] and adapts it to the
//! high-level application lifecycle.
//!
//! # Responsibilities
//!
//! - Converts high-level [`crate::AppAction`] into session operations.
//! - Owns exactly one session at a time, tearing the old one down before a
//!   new identity or rejoin opens another.
//! - Accumulates [`TransportCommand`]s to be executed by the driver in the
//!   next I/O cycle.
//! - Interprets session actions and converts them back into
//!   [`crate::AppEvent`]s to update the UI.

use dropfour_client::{
    ConnectRequest, MoveIntent, Session, SessionAction, SessionEvent,
};
use dropfour_proto::{ClientMessage, ServerMessage};

use crate::{AppAction, AppEvent, SessionView};

/// Socket operation requested by the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportCommand {
    /// Open a socket. Replaces any existing one.
    Connect(ConnectRequest),
    /// Send a message on the open socket.
    Send(ClientMessage),
    /// Close the socket.
    Close,
}

/// Bridge between App and Session protocol logic.
#[derive(Debug, Default)]
pub struct Bridge {
    session: Option<Session>,
    outgoing: Vec<TransportCommand>,
}

impl Bridge {
    /// Create a new Bridge with no session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current session. `None` before the first join.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Process an App action and return resulting App events.
    pub fn process_app_action(&mut self, action: AppAction) -> Vec<AppEvent> {
        match action {
            AppAction::Join { username } => self.open(Session::new(username)),
            AppAction::Rejoin { username, game_id } => {
                self.open(Session::resume(username, game_id))
            },
            AppAction::SubmitMove { column } => {
                let actions = self
                    .session
                    .as_ref()
                    .map(|s| s.submit_move(MoveIntent::new(column)))
                    .unwrap_or_default();
                self.process_session_actions(actions)
            },
            AppAction::Render | AppAction::Quit | AppAction::RefreshLeaderboard => vec![],
        }
    }

    /// The socket for the current session opened.
    pub fn handle_opened(&mut self) -> Vec<AppEvent> {
        self.handle_event(SessionEvent::Opened)
    }

    /// A message arrived on the current socket.
    pub fn handle_message(&mut self, message: ServerMessage) -> Vec<AppEvent> {
        self.handle_event(SessionEvent::Message(message))
    }

    /// The current socket closed or could not be opened.
    pub fn handle_closed(&mut self) -> Vec<AppEvent> {
        self.handle_event(SessionEvent::Closed)
    }

    /// Tear down the current session, if any.
    pub fn teardown(&mut self) -> Vec<AppEvent> {
        let actions = self.session.as_mut().map(Session::teardown).unwrap_or_default();
        self.process_session_actions(actions)
    }

    /// Take pending transport commands, in the order they were issued.
    pub fn take_outgoing(&mut self) -> Vec<TransportCommand> {
        std::mem::take(&mut self.outgoing)
    }

    fn handle_event(&mut self, event: SessionEvent) -> Vec<AppEvent> {
        let actions = self.session.as_mut().map(|s| s.handle(event)).unwrap_or_default();
        self.process_session_actions(actions)
    }

    fn open(&mut self, mut session: Session) -> Vec<AppEvent> {
        // The old socket must be closed before the new one is requested.
        let mut actions = self.session.as_mut().map(Session::teardown).unwrap_or_default();
        actions.retain(|a| !matches!(a, SessionAction::Render));

        actions.extend(session.connect());
        self.session = Some(session);
        self.process_session_actions(actions)
    }

    fn process_session_actions(&mut self, actions: Vec<SessionAction>) -> Vec<AppEvent> {
        let mut events = Vec::new();
        let mut render = false;

        for action in actions {
            match action {
                SessionAction::Connect(request) => {
                    self.outgoing.push(TransportCommand::Connect(request));
                },
                SessionAction::Send(message) => {
                    self.outgoing.push(TransportCommand::Send(message));
                },
                SessionAction::Close => self.outgoing.push(TransportCommand::Close),
                SessionAction::Notify(notice) => events.push(AppEvent::Notice(notice)),
                SessionAction::Render => render = true,
            }
        }

        if render && let Some(session) = &self.session {
            events.push(AppEvent::SessionChanged(SessionView::of(session)));
        }

        events
    }
}
