//! Observable application state types.
//!
//! This module defines the data structures that represent the application's
//! current view of the world, such as [`SessionView`] and [`NoticeLog`].
//!
//! These structures serve as the "View Model" for the application. They
//! contain the subset of session state necessary for rendering the UI, copied
//! out of the [`Session`] so the App never touches the connection.

use std::collections::VecDeque;

use dropfour_client::{ConnectionStatus, GameSnapshot, Session};
use dropfour_proto::{GameId, LastMove};

/// Which screen the App is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Username entry form.
    #[default]
    Login,
    /// Board, status and leaderboard.
    Game,
}

/// Copy of a session's exposed state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionView {
    /// Connection status.
    pub status: ConnectionStatus,
    /// Last authoritative snapshot. `None` before a game starts.
    pub snapshot: Option<GameSnapshot>,
    /// Opponent's username.
    pub opponent: Option<String>,
    /// Current game.
    pub game_id: Option<GameId>,
    /// Outcome of the finished game.
    pub result: Option<String>,
    /// Move reported with the latest update.
    pub last_move: Option<LastMove>,
    /// Latest queue notice.
    pub queue_message: Option<String>,
    /// Game that can be rejoined after a drop.
    pub rejoinable: Option<GameId>,
}

impl SessionView {
    /// Capture the exposed state of `session`.
    pub fn of(session: &Session) -> Self {
        Self {
            status: session.status(),
            snapshot: session.snapshot().cloned(),
            opponent: session.opponent().map(str::to_owned),
            game_id: session.game_id().cloned(),
            result: session.result().map(str::to_owned),
            last_move: session.last_move(),
            queue_message: session.queue_message().map(str::to_owned),
            rejoinable: session.rejoinable_game().cloned(),
        }
    }

    /// Moves are accepted by the session right now.
    pub fn accepts_moves(&self) -> bool {
        self.status == ConnectionStatus::Playing
    }
}

/// Bounded log of notifications, oldest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeLog {
    entries: VecDeque<String>,
    capacity: usize,
}

impl NoticeLog {
    /// Default number of retained entries.
    pub const DEFAULT_CAPACITY: usize = 50;

    /// Log retaining at most `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { entries: VecDeque::with_capacity(capacity), capacity }
    }

    /// Append an entry, dropping the oldest when full.
    pub fn push(&mut self, entry: impl Into<String>) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry.into());
    }

    /// Entries, oldest first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Most recent entry.
    pub fn latest(&self) -> Option<&str> {
        self.entries.back().map(String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Log has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for NoticeLog {
    fn default() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }
}
