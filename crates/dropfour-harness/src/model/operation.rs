//! Operations for model-based testing.
//!
//! Operations represent everything that can happen to a session. They are
//! generated randomly by proptest and applied to both the model and the real
//! implementation.

use dropfour_client::{MoveIntent, Session, SessionAction, SessionEvent};
use dropfour_proto::ServerMessage;

/// Operations that can be applied to a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// The socket handshake completed.
    Open,
    /// A message arrived.
    Receive(ServerMessage),
    /// The player asked to drop a disc.
    SubmitMove {
        /// Zero-based column.
        column: usize,
    },
    /// The socket closed.
    Close,
    /// The host tore the session down.
    Teardown,
}

impl Operation {
    /// Apply to the real session, returning its actions.
    pub fn apply_to(&self, session: &mut Session) -> Vec<SessionAction> {
        match self {
            Self::Open => session.handle(SessionEvent::Opened),
            Self::Receive(message) => session.handle(SessionEvent::Message(message.clone())),
            Self::SubmitMove { column } => session.submit_move(MoveIntent::new(*column)),
            Self::Close => session.handle(SessionEvent::Closed),
            Self::Teardown => session.teardown(),
        }
    }
}
