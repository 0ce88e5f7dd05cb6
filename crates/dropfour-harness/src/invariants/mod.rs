//! Client-wide properties checked at every render.
//!
//! A [`ClientSnapshot`] copies what the App shows: status, board, colour,
//! cursor and notices. Each [`Invariant`] inspects it and reports a
//! [`Violation`] naming itself. `SimDriver` runs the registry after every
//! frame it draws, and the property tests run it after every scripted step.
//!
//! ```ignore
//! let registry = InvariantRegistry::standard();
//! let snapshot = SystemSnapshot::single(ClientSnapshot::from_app(0, &app));
//! registry.check_all(&snapshot)?;
//! ```

mod checks;
mod snapshot;

use thiserror::Error;

pub use checks::{
    ColorFixedWithinGame, CursorWithinBoard, GameStateHasBoard, NoticeLogBounded,
    ResultOnlyAfterGameOver,
};
pub use snapshot::{ClientSnapshot, SystemSnapshot};

/// Outcome of one check.
pub type InvariantResult = Result<(), Violation>;

/// A broken property, with the check that caught it.
#[derive(Debug, Clone, Error)]
#[error("{invariant}: {message}")]
pub struct Violation {
    /// Name of the check.
    pub invariant: &'static str,
    /// What the snapshot showed.
    pub message: String,
}

/// A property of the client that holds after every event, whatever the
/// server sends and whatever the user presses.
pub trait Invariant: Send + Sync {
    /// Short name, shown in violation reports.
    fn name(&self) -> &'static str;

    /// Inspect every client in `state`.
    fn check(&self, state: &SystemSnapshot) -> InvariantResult;
}

/// The set of checks run against each snapshot.
pub struct InvariantRegistry {
    invariants: Vec<Box<dyn Invariant>>,
}

impl Default for InvariantRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl InvariantRegistry {
    /// No checks.
    pub fn new() -> Self {
        Self { invariants: Vec::new() }
    }

    /// Every check the client must pass:
    /// - [`GameStateHasBoard`]: in-game statuses always carry a board
    /// - [`ColorFixedWithinGame`]: a game never changes this client's colour
    /// - [`ResultOnlyAfterGameOver`]: a result implies the game is over
    /// - [`CursorWithinBoard`]: the column cursor stays on the board
    /// - [`NoticeLogBounded`]: the notice log never exceeds its capacity
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.add(GameStateHasBoard);
        registry.add(ColorFixedWithinGame);
        registry.add(ResultOnlyAfterGameOver);
        registry.add(CursorWithinBoard);
        registry.add(NoticeLogBounded);
        registry
    }

    /// Register another check.
    pub fn add<I: Invariant + 'static>(&mut self, invariant: I) {
        self.invariants.push(Box::new(invariant));
    }

    /// Run every check, collecting all violations rather than stopping at
    /// the first.
    pub fn check_all(&self, state: &SystemSnapshot) -> Result<(), Vec<Violation>> {
        let violations: Vec<_> =
            self.invariants.iter().filter_map(|inv| inv.check(state).err()).collect();

        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }

    /// Fail the calling test if any check fails. `context` says where in
    /// the run the snapshot was taken, e.g. `"at render 12"`.
    #[allow(clippy::panic, reason = "harness assertions fail the calling test")]
    pub fn assert_all(&self, state: &SystemSnapshot, context: &str) {
        if let Err(violations) = self.check_all(state) {
            let messages: Vec<_> = violations.iter().map(ToString::to_string).collect();
            panic!("Client invariant broken {context}:\n  {}", messages.join("\n  "));
        }
    }

    /// Number of checks.
    pub fn len(&self) -> usize {
        self.invariants.len()
    }

    /// No checks registered.
    pub fn is_empty(&self) -> bool {
        self.invariants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_registry_has_every_check() {
        let registry = InvariantRegistry::standard();
        assert!(!registry.is_empty());
        assert_eq!(registry.len(), 5);
    }

    #[test]
    fn no_clients_passes() {
        let registry = InvariantRegistry::standard();
        let snapshot = SystemSnapshot::empty();
        assert!(registry.check_all(&snapshot).is_ok());
    }

    #[test]
    #[should_panic(expected = "Client invariant broken after start")]
    fn playing_without_board_fails_with_context() {
        let registry = InvariantRegistry::standard();
        let client = ClientSnapshot {
            status: dropfour_client::ConnectionStatus::Playing,
            ..ClientSnapshot::new(1)
        };
        registry.assert_all(&SystemSnapshot::single(client), "after start");
    }
}
