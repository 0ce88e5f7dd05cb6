//! Application side-effects and intents.
//!
//! This module defines the [`AppAction`] enum, which represents instructions
//! produced by the [`crate::App`] state machine for the runtime to execute.

use dropfour_proto::GameId;

/// Actions produced by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Render the UI.
    Render,

    /// Quit the application.
    Quit,

    /// Open a fresh session and join the matchmaking queue.
    ///
    /// Any previous session is torn down first.
    Join {
        /// Player identity.
        username: String,
    },

    /// Open a fresh session that asks the server to rejoin a game.
    Rejoin {
        /// Player identity.
        username: String,
        /// Game the previous session was playing.
        game_id: GameId,
    },

    /// Drop a disc into a column.
    SubmitMove {
        /// Zero-based column index.
        column: usize,
    },

    /// Fetch the leaderboard.
    RefreshLeaderboard,
}
