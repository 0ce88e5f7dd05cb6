//! Application state machine.
//!
//! This module defines the [`App`] state machine, which manages the
//! interactive state of the application completely decoupled from I/O and
//! protocol mechanics.
//!
//! This is a pure state machine: it consumes [`crate::AppEvent`] inputs and
//! produces [`crate::AppAction`] instructions for the runtime to execute.
//!
//! # Responsibilities
//!
//! - Acquires the player identity on the login screen.
//! - Tracks the board column cursor and turns keys and clicks into moves.
//! - Mirrors the session's exposed state for rendering.
//! - Keeps the notice log and the latest leaderboard.

use dropfour_client::{ConnectionStatus, Notice};
use dropfour_proto::{Board, LeaderboardEntry};

use crate::{
    AppAction, AppEvent, BoardSurface, KeyInput, LineEditor, NoticeLog, Screen, SessionView,
    autoplay,
};

/// Application state machine.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies - fully testable in simulation.
#[derive(Debug, Clone)]
pub struct App {
    /// Screen being shown.
    screen: Screen,
    /// Username entry buffer.
    input: LineEditor,
    /// Committed identity. `None` until the login form is submitted.
    username: Option<String>,
    /// Latest copy of the session's exposed state.
    session: SessionView,
    /// Column the keyboard cursor is on.
    cursor: usize,
    /// Recent notifications.
    notices: NoticeLog,
    /// Transient status message. `None` if no message.
    status_message: Option<String>,
    /// Latest leaderboard. Empty until loaded or after a failed fetch.
    leaderboard: Vec<LeaderboardEntry>,
    /// Terminal dimensions (columns, rows).
    terminal_size: (u16, u16),
    /// Submit moves automatically on our turn.
    auto_play: bool,
    /// Board an automatic move was already submitted for.
    auto_moved_on: Option<Board>,
}

impl App {
    /// Create a new App on the login screen.
    pub fn new(auto_play: bool) -> Self {
        Self {
            screen: Screen::Login,
            input: LineEditor::new(),
            username: None,
            session: SessionView::default(),
            cursor: 0,
            notices: NoticeLog::default(),
            status_message: None,
            leaderboard: Vec::new(),
            terminal_size: (80, 24),
            auto_play,
            auto_moved_on: None,
        }
    }

    /// Pre-fill the username form.
    #[must_use]
    pub fn with_username(mut self, username: &str) -> Self {
        self.input.set(username);
        self
    }

    /// Actions to run once at startup.
    ///
    /// Loads the leaderboard, and logs in straight away when a username was
    /// supplied up front.
    pub fn start(&mut self) -> Vec<AppAction> {
        let mut actions = vec![AppAction::RefreshLeaderboard];
        if self.input.buffer().trim().is_empty() {
            actions.push(AppAction::Render);
        } else {
            actions.extend(self.submit_username());
        }
        actions
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::Key(key) => match self.screen {
                Screen::Login => self.handle_login_key(key),
                Screen::Game => self.handle_game_key(key),
            },
            AppEvent::Click { row, col } => self.click(row, col),
            AppEvent::Tick => vec![],
            AppEvent::Resize(cols, rows) => {
                self.terminal_size = (cols, rows);
                vec![AppAction::Render]
            },
            AppEvent::SessionChanged(view) => self.session_changed(view),
            AppEvent::Notice(notice) => {
                self.notify(&notice);
                vec![AppAction::Render]
            },
            AppEvent::LeaderboardLoaded(entries) => {
                self.leaderboard = entries;
                vec![AppAction::Render]
            },
            AppEvent::Error { message } => {
                let text = format!("Error: {message}");
                self.notices.push(text.clone());
                self.status_message = Some(text);
                vec![AppAction::Render]
            },
        }
    }

    fn handle_login_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        match key {
            KeyInput::Enter => self.submit_username(),
            KeyInput::Esc => self.quit(),
            key => {
                if self.input.edit(key) {
                    vec![AppAction::Render]
                } else {
                    vec![]
                }
            },
        }
    }

    fn handle_game_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        let columns = self.columns();
        match key {
            KeyInput::Esc | KeyInput::Char('q') => self.quit(),
            KeyInput::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                vec![AppAction::Render]
            },
            KeyInput::Right => {
                if self.cursor + 1 < columns {
                    self.cursor += 1;
                }
                vec![AppAction::Render]
            },
            KeyInput::Home => {
                self.cursor = 0;
                vec![AppAction::Render]
            },
            KeyInput::End => {
                self.cursor = columns.saturating_sub(1);
                vec![AppAction::Render]
            },
            KeyInput::Char(c @ '1'..='9') => {
                let column = c.to_digit(10).map_or(0, |d| d as usize - 1);
                if column < columns {
                    self.cursor = column;
                    vec![AppAction::Render]
                } else {
                    vec![]
                }
            },
            KeyInput::Enter | KeyInput::Char(' ') => self.submit_move(self.cursor),
            KeyInput::Char('r') => self.reconnect(),
            KeyInput::Char('n') => self.new_game(),
            KeyInput::Char('l') => self.refresh_leaderboard(),
            _ => vec![],
        }
    }

    fn submit_username(&mut self) -> Vec<AppAction> {
        let username = self.input.buffer().trim().to_owned();
        if username.is_empty() {
            self.status_message = Some("Enter a username".into());
            return vec![AppAction::Render];
        }

        self.input.take();
        self.join(username)
    }

    /// Open a fresh session for `username`.
    ///
    /// Switches to the game screen. The runtime tears down any previous
    /// session before opening the new one.
    pub fn join(&mut self, username: String) -> Vec<AppAction> {
        if username.trim().is_empty() {
            return vec![];
        }

        self.screen = Screen::Game;
        self.session = SessionView::default();
        self.cursor = 0;
        self.auto_moved_on = None;
        self.status_message = Some(format!("Connecting as {username}..."));
        self.username = Some(username.clone());
        vec![AppAction::Join { username }, AppAction::Render]
    }

    /// Submit a move for `column`.
    ///
    /// Only offered while the session is `playing`; the session enforces the
    /// same gate.
    pub fn submit_move(&mut self, column: usize) -> Vec<AppAction> {
        if !self.session.accepts_moves() {
            self.status_message = Some(format!("Cannot move while {}", self.session.status));
            return vec![AppAction::Render];
        }

        if column < self.columns() {
            self.cursor = column;
        }
        vec![AppAction::SubmitMove { column }, AppAction::Render]
    }

    fn click(&mut self, row: usize, col: usize) -> Vec<AppAction> {
        if self.screen != Screen::Game {
            return vec![];
        }

        let mut intent = None;
        BoardSurface::new(self.session.snapshot.as_ref()).click(row, col, |i| intent = Some(i));
        match intent {
            Some(intent) => self.submit_move(intent.column),
            None => vec![],
        }
    }

    /// Reconnect after a drop, rejoining the game if it had not finished.
    pub fn reconnect(&mut self) -> Vec<AppAction> {
        let Some(username) = self.username.clone() else {
            return vec![];
        };

        if let Some(game_id) = self.session.rejoinable.clone() {
            self.status_message = Some(format!("Rejoining game {game_id}..."));
            self.auto_moved_on = None;
            return vec![AppAction::Rejoin { username, game_id }, AppAction::Render];
        }

        if self.session.status == ConnectionStatus::Disconnected {
            return self.join(username);
        }

        self.status_message = Some("Still connected".into());
        vec![AppAction::Render]
    }

    /// Start a new game once the current one is over or the socket dropped.
    pub fn new_game(&mut self) -> Vec<AppAction> {
        let Some(username) = self.username.clone() else {
            return vec![];
        };

        match self.session.status {
            ConnectionStatus::Ended | ConnectionStatus::Disconnected => self.join(username),
            status => {
                self.status_message = Some(format!("Cannot start a new game while {status}"));
                vec![AppAction::Render]
            },
        }
    }

    /// Fetch the leaderboard again.
    pub fn refresh_leaderboard(&mut self) -> Vec<AppAction> {
        vec![AppAction::RefreshLeaderboard]
    }

    /// Quit the application.
    pub fn quit(&self) -> Vec<AppAction> {
        vec![AppAction::Quit]
    }

    fn session_changed(&mut self, view: SessionView) -> Vec<AppAction> {
        if view.queue_message != self.session.queue_message
            && let Some(message) = &view.queue_message
        {
            self.notices.push(message.clone());
        }
        if view.status != self.session.status {
            self.status_message = Some(Self::status_text(&view));
        }

        self.session = view;
        self.cursor = self.cursor.min(self.columns().saturating_sub(1));

        let mut actions = self.auto_move();
        actions.push(AppAction::Render);
        actions
    }

    fn auto_move(&mut self) -> Vec<AppAction> {
        if !self.auto_play || !self.session.accepts_moves() {
            return vec![];
        }
        let Some(snapshot) = &self.session.snapshot else {
            return vec![];
        };
        if !snapshot.is_my_turn() || self.auto_moved_on.as_ref() == Some(&snapshot.board) {
            return vec![];
        }

        let board = snapshot.board.clone();
        let Some(column) = autoplay::choose_column(&board) else {
            return vec![];
        };

        tracing::debug!(column, "auto move");
        self.auto_moved_on = Some(board);
        self.cursor = column;
        vec![AppAction::SubmitMove { column }]
    }

    fn notify(&mut self, notice: &Notice) {
        let text = notice.to_string();
        self.notices.push(text.clone());
        self.status_message = Some(text);
    }

    fn status_text(view: &SessionView) -> String {
        match view.status {
            ConnectionStatus::Connecting => "Connecting...".into(),
            ConnectionStatus::Waiting => "Waiting for an opponent".into(),
            ConnectionStatus::Playing => match &view.opponent {
                Some(opponent) => format!("Playing against {opponent}"),
                None => "Playing".into(),
            },
            // Moves stay closed until the server sends an update
            ConnectionStatus::Rejoined => {
                "Rejoined game, moves resume after the next update".into()
            },
            ConnectionStatus::Ended => match &view.result {
                Some(result) => format!("Game over: {result} (n: new game)"),
                None => "Game over (n: new game)".into(),
            },
            ConnectionStatus::Disconnected if view.rejoinable.is_some() => {
                "Disconnected (r: rejoin, n: new game)".into()
            },
            ConnectionStatus::Disconnected => "Disconnected (n: new game)".into(),
        }
    }

    fn columns(&self) -> usize {
        self.session.snapshot.as_ref().map_or(0, |s| s.board.column_count())
    }

    /// Screen being shown.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Username entry buffer.
    pub fn input(&self) -> &LineEditor {
        &self.input
    }

    /// Committed identity. `None` before login.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Latest copy of the session's exposed state.
    pub fn session(&self) -> &SessionView {
        &self.session
    }

    /// Board surface for the current snapshot.
    pub fn surface(&self) -> BoardSurface<'_> {
        BoardSurface::new(self.session.snapshot.as_ref())
    }

    /// Column the keyboard cursor is on.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Recent notifications, oldest first.
    pub fn notices(&self) -> &NoticeLog {
        &self.notices
    }

    /// Transient status message. `None` if no message.
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    /// Latest leaderboard.
    pub fn leaderboard(&self) -> &[LeaderboardEntry] {
        &self.leaderboard
    }

    /// Terminal dimensions (columns, rows).
    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    /// Moves are submitted automatically.
    pub fn auto_play(&self) -> bool {
        self.auto_play
    }
}
