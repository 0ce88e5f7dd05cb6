//! Driver trait for abstracting I/O operations.
//!
//! The [`Driver`] trait decouples the application runtime from specific I/O
//! implementations. Each frontend implements the trait to provide
//! platform-specific I/O, while the generic [`crate::Runtime`] handles all
//! orchestration.

use std::future::Future;

use dropfour_client::ConnectRequest;
use dropfour_proto::{ClientMessage, LeaderboardEntry, ServerMessage};

use crate::{App, AppEvent};

/// Something the socket delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    /// Decoded server message.
    Message(ServerMessage),
    /// The socket closed. Nothing further arrives on it.
    Closed,
}

/// Abstracts I/O operations for the application runtime.
///
/// Implementations provide platform-specific I/O while the generic
/// [`Runtime`](crate::Runtime) handles orchestration logic. This ensures
/// the same orchestration code runs in the production TUI and in simulation.
///
/// # Implementations
///
/// - **TUI**: Uses crossterm for terminal events, tokio-tungstenite for the
///   WebSocket and reqwest for the leaderboard
/// - **Simulation**: Scripted events and captured messages
///
/// A driver holds at most one socket. [`connect`](Driver::connect) replaces
/// it and [`disconnect`](Driver::disconnect) drops it.
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Poll for the next input event.
    ///
    /// Returns an available event or `None` if no events are ready.
    fn poll_event(&mut self) -> impl Future<Output = Result<Option<AppEvent>, Self::Error>> + Send;

    /// Send a message on the open socket.
    ///
    /// # Errors
    ///
    /// Returns an error if the socket is closed or the send fails.
    fn send(
        &mut self,
        message: ClientMessage,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Take the next delivered item without waiting.
    ///
    /// Returns `None` if nothing is pending.
    fn recv(&mut self) -> impl Future<Output = Option<Inbound>> + Send;

    /// Open a socket for `request`, replacing any current one.
    ///
    /// Resolves once the socket is open.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established.
    fn connect(
        &mut self,
        request: &ConnectRequest,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Close the current socket, if any.
    fn disconnect(&mut self);

    /// A socket is open.
    fn is_connected(&self) -> bool;

    /// Fetch the leaderboard. Empty on failure.
    fn fetch_leaderboard(&mut self) -> impl Future<Output = Vec<LeaderboardEntry>> + Send;

    /// Render the application state.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render(&mut self, app: &App) -> Result<(), Self::Error>;

    /// Stop the connection and clean up resources.
    fn stop(&mut self);
}
