//! Terminal driver for the TUI.
//!
//! Implements the [`Driver`] trait for terminal I/O using crossterm for
//! keyboard and mouse events and ratatui for rendering. The game socket is a
//! tokio-tungstenite WebSocket and the leaderboard is fetched with reqwest.

use std::io::{self, Stdout, stdout};

use crossterm::{
    ExecutableCommand,
    event::{
        DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyCode, KeyEvent,
        KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use dropfour_app::{App, AppEvent, Driver, Inbound};
use dropfour_client::{
    ConnectRequest, Endpoint, leaderboard,
    transport::{self, ConnectedClient, TransportError},
};
use dropfour_proto::{ClientMessage, LeaderboardEntry};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use thiserror::Error;
use tokio::sync::mpsc::error::TryRecvError;

use crate::{KeyInput, ui, ui::BoardGeometry};

/// Terminal driver errors.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Transport error.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Channel send error.
    #[error("channel send error")]
    ChannelSend,
}

/// Terminal driver implementing the [`Driver`] trait.
///
/// Handles terminal I/O (crossterm), rendering (ratatui), the game socket
/// (tokio-tungstenite) and the leaderboard (reqwest). Remembers where the
/// board was last drawn so mouse clicks can be mapped to cells.
pub struct TerminalDriver {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_stream: EventStream,
    connection: Option<ConnectedClient>,
    endpoint: Endpoint,
    http: reqwest::Client,
    board: Option<BoardGeometry>,
}

impl TerminalDriver {
    /// Take over the terminal and prepare to talk to `endpoint`.
    pub fn new(endpoint: Endpoint) -> Result<Self, TerminalError> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?.execute(EnableMouseCapture)?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;
        let event_stream = EventStream::new();

        Ok(Self {
            terminal,
            event_stream,
            connection: None,
            endpoint,
            http: reqwest::Client::new(),
            board: None,
        })
    }

    /// Convert a crossterm key event to `KeyInput`.
    ///
    /// Ctrl-C maps to `Esc`: raw mode swallows the signal.
    fn convert_key(event: KeyEvent) -> Option<KeyInput> {
        if event.modifiers.contains(KeyModifiers::CONTROL) && event.code == KeyCode::Char('c') {
            return Some(KeyInput::Esc);
        }

        match event.code {
            KeyCode::Char(c) => Some(KeyInput::Char(c)),
            KeyCode::Enter => Some(KeyInput::Enter),
            KeyCode::Backspace => Some(KeyInput::Backspace),
            KeyCode::Delete => Some(KeyInput::Delete),
            KeyCode::Esc => Some(KeyInput::Esc),
            KeyCode::Left => Some(KeyInput::Left),
            KeyCode::Right => Some(KeyInput::Right),
            KeyCode::Home => Some(KeyInput::Home),
            KeyCode::End => Some(KeyInput::End),
            _ => None,
        }
    }

    /// Map a left click to the board cell under it.
    fn convert_mouse(board: Option<&BoardGeometry>, event: MouseEvent) -> Option<AppEvent> {
        if event.kind != MouseEventKind::Down(MouseButton::Left) {
            return None;
        }
        let (row, col) = board?.cell_at(event.column, event.row)?;
        Some(AppEvent::Click { row, col })
    }
}

impl Driver for TerminalDriver {
    type Error = TerminalError;

    async fn poll_event(&mut self) -> Result<Option<AppEvent>, Self::Error> {
        let timeout = tokio::time::Duration::from_millis(100);

        tokio::select! {
            biased;

            // Terminal events
            maybe_event = self.event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) if key_event.kind == KeyEventKind::Press => {
                        Ok(Self::convert_key(key_event).map(AppEvent::Key))
                    },
                    Some(Ok(Event::Mouse(mouse_event))) => {
                        Ok(Self::convert_mouse(self.board.as_ref(), mouse_event))
                    },
                    Some(Ok(Event::Resize(cols, rows))) => Ok(Some(AppEvent::Resize(cols, rows))),
                    Some(Err(e)) => Err(TerminalError::Io(e)),
                    _ => Ok(None),
                }
            }

            // Tick timeout
            () = tokio::time::sleep(timeout) => {
                Ok(Some(AppEvent::Tick))
            }
        }
    }

    async fn send(&mut self, message: ClientMessage) -> Result<(), Self::Error> {
        if let Some(conn) = &self.connection {
            conn.to_server.send(message).await.map_err(|_| TerminalError::ChannelSend)?;
        }
        Ok(())
    }

    async fn recv(&mut self) -> Option<Inbound> {
        let conn = self.connection.as_mut()?;
        match conn.from_server.try_recv() {
            Ok(message) => Some(Inbound::Message(message)),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.connection = None;
                Some(Inbound::Closed)
            },
        }
    }

    async fn connect(&mut self, request: &ConnectRequest) -> Result<(), Self::Error> {
        self.disconnect();
        let client = transport::connect(&self.endpoint, request).await?;
        self.connection = Some(client);
        Ok(())
    }

    fn disconnect(&mut self) {
        // Dropping the sender makes the socket task send a close frame.
        self.connection = None;
    }

    fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    async fn fetch_leaderboard(&mut self) -> Vec<LeaderboardEntry> {
        leaderboard::fetch_leaderboard(&self.http, &self.endpoint).await
    }

    fn render(&mut self, app: &App) -> Result<(), Self::Error> {
        let mut board = None;
        self.terminal.draw(|frame| {
            board = ui::render(frame, app);
        })?;
        self.board = board;
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(ref conn) = self.connection {
            conn.stop();
        }
    }
}

impl Drop for TerminalDriver {
    fn drop(&mut self) {
        self.stop();
        let _ = disable_raw_mode();
        let _ = stdout().execute(DisableMouseCapture);
        let _ = stdout().execute(LeaveAlternateScreen);
    }
}
