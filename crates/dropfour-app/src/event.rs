//! Application input events.
//!
//! This module defines [`AppEvent`], the set of inputs that drive the
//! [`crate::App`] state machine.
//!
//! Events originate from two distinct sources:
//! - User interactions (keyboard, mouse, resize) and system ticks.
//! - Session notifications translated by the [`crate::Bridge`].

use dropfour_client::Notice;
use dropfour_proto::LeaderboardEntry;

use crate::{KeyInput, SessionView};

/// Events processed by the App state machine.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Keyboard input.
    Key(KeyInput),

    /// Click on a board cell, already hit-tested by the host.
    Click {
        /// Row index, top to bottom.
        row: usize,
        /// Column index, left to right.
        col: usize,
    },

    /// Periodic tick.
    Tick,

    /// Terminal resize (columns, rows).
    Resize(u16, u16),

    /// Session exposed state changed.
    SessionChanged(SessionView),

    /// Notification from the session.
    Notice(Notice),

    /// Leaderboard fetched. Empty when the fetch failed.
    LeaderboardLoaded(Vec<LeaderboardEntry>),

    /// Error occurred.
    Error {
        /// Error description.
        message: String,
    },
}
