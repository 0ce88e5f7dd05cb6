//! Connection status transition table.

use dropfour_proto::ServerMessage;

use crate::{ConnectionStatus, SessionEvent};

/// Next status after `event`, or `None` when the event is ignored in `status`.
///
/// Pure and total. An ignored event must not touch any other session state
/// either: the session applies snapshot changes only for accepted events.
///
/// `info`, `error` and unknown messages never transition. `Closed` moves every
/// status to [`ConnectionStatus::Disconnected`].
pub fn transition(status: ConnectionStatus, event: &SessionEvent) -> Option<ConnectionStatus> {
    let message = match event {
        SessionEvent::Closed => return Some(ConnectionStatus::Disconnected),
        SessionEvent::Opened => {
            return (status == ConnectionStatus::Connecting).then_some(ConnectionStatus::Waiting);
        },
        SessionEvent::Message(message) => message,
    };

    use ConnectionStatus::{Connecting, Disconnected, Ended, Playing, Rejoined, Waiting};

    match (status, message) {
        (Waiting, ServerMessage::Queued { .. }) => Some(Waiting),
        (Waiting, ServerMessage::Start(_)) => Some(Playing),
        (Playing | Rejoined, ServerMessage::Update(_)) => Some(Playing),
        (Playing | Rejoined, ServerMessage::GameOver { .. }) => Some(Ended),
        (Connecting | Waiting | Disconnected, ServerMessage::Rejoined(_)) => Some(Rejoined),
        _ => None,
    }
}
