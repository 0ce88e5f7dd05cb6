//! Simulation driver implementing the Driver trait.
//!
//! `SimDriver` provides the same interface as `TerminalDriver` but for
//! deterministic testing. It implements [`Driver`] so the same
//! [`dropfour_app::Runtime`] orchestration code runs in both production and
//! simulation.
//!
//! The simulated socket follows the real one: opening it discards anything
//! queued for a previous socket, and a scripted close is delivered in order
//! after the messages injected before it.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use dropfour_app::{App, AppEvent, Driver, Inbound, Screen};
use dropfour_client::{ConnectRequest, ConnectionStatus};
use dropfour_proto::{ClientMessage, GameId, LeaderboardEntry, PlayerColor, ServerMessage};
use thiserror::Error;

use crate::invariants::{ClientSnapshot, InvariantRegistry, SystemSnapshot};

/// Error type for simulation driver.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimDriverError {
    /// A send was attempted with no socket open.
    #[error("not connected")]
    NotConnected,

    /// The scripted server refused the connection.
    #[error("connection refused for {0}")]
    ConnectionRefused(String),
}

/// Renders and connection attempts, in the order the runtime made them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverCall {
    /// A frame was drawn.
    Render {
        /// Screen on display.
        screen: Screen,
        /// Session status shown.
        status: ConnectionStatus,
    },
    /// A socket was requested.
    Connect(ConnectRequest),
}

/// Shared state for event injection.
///
/// This allows injection while the runtime owns the driver.
#[derive(Default)]
struct SharedState {
    pending_events: VecDeque<AppEvent>,
    incoming: VecDeque<Inbound>,
    sent: Vec<ClientMessage>,
    connects: Vec<ConnectRequest>,
    calls: Vec<DriverCall>,
    connected: bool,
    refuse_connect: bool,
    leaderboard: Vec<LeaderboardEntry>,
    leaderboard_fetches: usize,
    renders: usize,
    stopped: bool,
    color_history: Vec<(GameId, PlayerColor)>,
}

/// Simulation driver for deterministic testing.
///
/// Implements [`Driver`] trait so the same [`dropfour_app::Runtime`]
/// orchestration code runs in both production TUI and simulation tests.
pub struct SimDriver {
    state: Arc<Mutex<SharedState>>,
    invariants: Option<InvariantRegistry>,
}

impl Default for SimDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl SimDriver {
    /// Create a new simulation driver.
    pub fn new() -> Self {
        Self { state: Arc::new(Mutex::new(SharedState::default())), invariants: None }
    }

    /// Enable invariant checking on every render.
    #[must_use]
    pub fn with_invariants(mut self, registry: InvariantRegistry) -> Self {
        self.invariants = Some(registry);
        self
    }

    fn state(&self) -> MutexGuard<'_, SharedState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Inject an `AppEvent` for processing.
    pub fn inject_event(&self, event: AppEvent) {
        self.state().pending_events.push_back(event);
    }

    /// Inject a message from the server on the current socket.
    pub fn inject_message(&self, message: ServerMessage) {
        self.state().incoming.push_back(Inbound::Message(message));
    }

    /// Close the current socket from the server side.
    pub fn inject_close(&self) {
        self.state().incoming.push_back(Inbound::Closed);
    }

    /// Inject a tick event.
    pub fn inject_tick(&self) {
        self.state().pending_events.push_back(AppEvent::Tick);
    }

    /// Drop the socket without telling anyone, so the next send fails.
    pub fn sever(&self) {
        let mut state = self.state();
        state.connected = false;
        state.incoming.clear();
    }

    /// Refuse (or accept again) subsequent connection attempts.
    pub fn refuse_connections(&self, refuse: bool) {
        self.state().refuse_connect = refuse;
    }

    /// Leaderboard returned by subsequent fetches.
    pub fn set_leaderboard(&self, entries: Vec<LeaderboardEntry>) {
        self.state().leaderboard = entries;
    }

    /// Take all captured outgoing messages.
    pub fn take_sent(&self) -> Vec<ClientMessage> {
        std::mem::take(&mut self.state().sent)
    }

    /// Every connection request made so far, oldest first.
    pub fn connects(&self) -> Vec<ConnectRequest> {
        self.state().connects.clone()
    }

    /// Renders and connects so far, oldest first.
    pub fn calls(&self) -> Vec<DriverCall> {
        self.state().calls.clone()
    }

    /// Number of leaderboard fetches.
    pub fn leaderboard_fetches(&self) -> usize {
        self.state().leaderboard_fetches
    }

    /// Number of renders.
    pub fn renders(&self) -> usize {
        self.state().renders
    }

    /// The driver was stopped.
    pub fn is_stopped(&self) -> bool {
        self.state().stopped
    }

    /// Check if there are pending events to process.
    pub fn has_pending(&self) -> bool {
        let state = self.state();
        !state.pending_events.is_empty() || !state.incoming.is_empty()
    }

    /// Create a snapshot from App state for invariant checking.
    ///
    /// Carries the colour history recorded at every render so far.
    pub fn snapshot_from_app(&self, app: &App) -> SystemSnapshot {
        let history = self.state().color_history.clone();
        SystemSnapshot::single(ClientSnapshot::from_app(0, app).with_color_history(history))
    }

    /// Check invariants against App state.
    pub fn check_invariants(&self, app: &App, context: &str) {
        if let Some(ref registry) = self.invariants {
            let snapshot = self.snapshot_from_app(app);
            registry.assert_all(&snapshot, context);
        }
    }
}

impl Driver for SimDriver {
    type Error = SimDriverError;

    async fn poll_event(&mut self) -> Result<Option<AppEvent>, Self::Error> {
        Ok(self.state().pending_events.pop_front())
    }

    async fn send(&mut self, message: ClientMessage) -> Result<(), Self::Error> {
        let mut state = self.state();
        if !state.connected {
            return Err(SimDriverError::NotConnected);
        }
        state.sent.push(message);
        Ok(())
    }

    async fn recv(&mut self) -> Option<Inbound> {
        let mut state = self.state();
        let inbound = state.incoming.pop_front()?;
        if inbound == Inbound::Closed {
            state.connected = false;
        }
        Some(inbound)
    }

    async fn connect(&mut self, request: &ConnectRequest) -> Result<(), Self::Error> {
        let mut state = self.state();
        state.connects.push(request.clone());
        state.calls.push(DriverCall::Connect(request.clone()));
        state.connected = false;
        state.incoming.clear();

        if state.refuse_connect {
            tracing::debug!(username = %request.username, "refusing connection");
            return Err(SimDriverError::ConnectionRefused(request.username.clone()));
        }
        state.connected = true;
        Ok(())
    }

    fn disconnect(&mut self) {
        let mut state = self.state();
        state.connected = false;
        state.incoming.clear();
    }

    fn is_connected(&self) -> bool {
        self.state().connected
    }

    async fn fetch_leaderboard(&mut self) -> Vec<LeaderboardEntry> {
        let mut state = self.state();
        state.leaderboard_fetches += 1;
        state.leaderboard.clone()
    }

    fn render(&mut self, app: &App) -> Result<(), Self::Error> {
        {
            let mut state = self.state();
            state.renders += 1;
            let status = app.session().status;
            state.calls.push(DriverCall::Render { screen: app.screen(), status });

            let mut client = ClientSnapshot::from_app(0, app);
            client.record_color();
            state.color_history.append(&mut client.color_history);
        }

        let context = format!("at render {}", self.renders());
        self.check_invariants(app, &context);
        Ok(())
    }

    fn stop(&mut self) {
        let mut state = self.state();
        state.stopped = true;
        state.connected = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inject_event_queues_event() {
        let driver = SimDriver::new();
        driver.inject_event(AppEvent::Tick);

        assert!(driver.has_pending());
    }

    #[tokio::test]
    async fn poll_event_pops_in_order() {
        let mut driver = SimDriver::new();
        driver.inject_tick();
        driver.inject_event(AppEvent::Resize(10, 10));

        assert!(matches!(driver.poll_event().await, Ok(Some(AppEvent::Tick))));
        assert!(matches!(driver.poll_event().await, Ok(Some(AppEvent::Resize(10, 10)))));
        assert!(matches!(driver.poll_event().await, Ok(None)));
    }

    #[tokio::test]
    async fn send_requires_connection() {
        let mut driver = SimDriver::new();
        let request = ConnectRequest { username: "alice".into(), game_id: None };

        assert_eq!(
            driver.send(ClientMessage::Move { col: 1 }).await,
            Err(SimDriverError::NotConnected)
        );

        driver.connect(&request).await.unwrap();
        driver.send(ClientMessage::Move { col: 1 }).await.unwrap();

        assert_eq!(driver.take_sent(), vec![ClientMessage::Move { col: 1 }]);
        assert_eq!(driver.connects(), vec![request]);
    }

    #[tokio::test]
    async fn close_is_delivered_after_earlier_messages() {
        let mut driver = SimDriver::new();
        let request = ConnectRequest { username: "alice".into(), game_id: None };
        driver.connect(&request).await.unwrap();

        driver.inject_message(ServerMessage::Unknown);
        driver.inject_close();

        assert_eq!(driver.recv().await, Some(Inbound::Message(ServerMessage::Unknown)));
        assert!(driver.is_connected());
        assert_eq!(driver.recv().await, Some(Inbound::Closed));
        assert!(!driver.is_connected());
    }

    #[tokio::test]
    async fn reconnect_discards_stale_messages() {
        let mut driver = SimDriver::new();
        let request = ConnectRequest { username: "alice".into(), game_id: None };
        driver.inject_message(ServerMessage::Unknown);

        driver.connect(&request).await.unwrap();
        assert_eq!(driver.recv().await, None);
    }

    #[tokio::test]
    async fn refused_connection_stays_disconnected() {
        let mut driver = SimDriver::new();
        driver.refuse_connections(true);
        let request = ConnectRequest { username: "alice".into(), game_id: None };

        assert!(driver.connect(&request).await.is_err());
        assert!(!driver.is_connected());
        assert_eq!(driver.connects().len(), 1);
    }

    #[tokio::test]
    async fn calls_are_logged_in_order() {
        let mut driver = SimDriver::new();
        let app = App::new(false);
        let request = ConnectRequest { username: "alice".into(), game_id: None };

        driver.render(&app).unwrap();
        driver.connect(&request).await.unwrap();

        assert_eq!(driver.calls(), vec![
            DriverCall::Render { screen: Screen::Login, status: ConnectionStatus::default() },
            DriverCall::Connect(request),
        ]);
    }
}
