//! Generic runtime for application orchestration.
//!
//! The Runtime drives the application event loop, coordinating between:
//! - [`App`]: UI state machine
//! - [`Bridge`]: Protocol bridge to the Session
//! - [`Driver`]: Platform-specific I/O

use crate::{App, AppAction, AppEvent, Bridge, Driver, Inbound, TransportCommand};

/// Generic runtime that orchestrates App, Bridge, and Driver.
///
/// # Type Parameters
///
/// - `D`: Platform-specific I/O driver
pub struct Runtime<D: Driver> {
    driver: D,
    app: App,
    bridge: Bridge,
}

impl<D: Driver> Runtime<D> {
    /// Create a new runtime with the given driver and app.
    pub fn new(driver: D, app: App) -> Self {
        Self { driver, app, bridge: Bridge::new() }
    }

    /// Run the main event loop until the app quits.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an I/O error.
    pub async fn run(mut self) -> Result<(), D::Error> {
        if !self.start().await? {
            loop {
                if self.step().await? {
                    break;
                }
            }
        }

        self.shutdown().await;
        Ok(())
    }

    /// Render once and execute the App's startup actions.
    ///
    /// Returns `true` if the application should quit.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an I/O error.
    pub async fn start(&mut self) -> Result<bool, D::Error> {
        self.driver.render(&self.app)?;
        let actions = self.app.start();
        self.process_actions(actions).await
    }

    /// Process one cycle of the event loop.
    ///
    /// This is the core orchestration step that:
    /// 1. Polls for an input event from the driver
    /// 2. Drains everything the socket has delivered into the session
    /// 3. Executes the resulting actions and transport commands
    ///
    /// Returns `true` if the application should quit.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an I/O error.
    pub async fn step(&mut self) -> Result<bool, D::Error> {
        if let Some(event) = self.driver.poll_event().await? {
            let actions = self.app.handle(event);
            if self.process_actions(actions).await? {
                return Ok(true);
            }
        }

        while self.driver.is_connected()
            && let Some(inbound) = self.driver.recv().await
        {
            let events = match inbound {
                Inbound::Message(message) => {
                    tracing::debug!(kind = message.kind(), "received");
                    self.bridge.handle_message(message)
                },
                Inbound::Closed => {
                    tracing::info!("socket closed");
                    self.driver.disconnect();
                    self.bridge.handle_closed()
                },
            };
            if self.process_bridge_events(events).await? {
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Tear down the session and stop the driver.
    pub async fn shutdown(&mut self) {
        let _ = self.bridge.teardown();
        let _ = self.flush_outgoing().await;
        self.driver.stop();
    }

    /// Process actions returned by the App.
    ///
    /// Returns `true` if should quit.
    async fn process_actions(
        &mut self,
        initial_actions: Vec<AppAction>,
    ) -> Result<bool, D::Error> {
        let mut pending_actions = initial_actions;

        while !pending_actions.is_empty() {
            let actions = std::mem::take(&mut pending_actions);

            for action in actions {
                match action {
                    AppAction::Render => self.driver.render(&self.app)?,
                    AppAction::Quit => return Ok(true),
                    AppAction::RefreshLeaderboard => {
                        let entries = self.driver.fetch_leaderboard().await;
                        let loaded = AppEvent::LeaderboardLoaded(entries);
                        pending_actions.extend(self.app.handle(loaded));
                    },

                    // Session operations go through the bridge
                    AppAction::Join { .. }
                    | AppAction::Rejoin { .. }
                    | AppAction::SubmitMove { .. } => {
                        let mut follow_up = Vec::new();
                        for event in self.bridge.process_app_action(action) {
                            follow_up.extend(self.app.handle(event));
                        }

                        // A new session is drawn before its handshake is awaited.
                        if follow_up.iter().any(|a| matches!(a, AppAction::Render)) {
                            self.driver.render(&self.app)?;
                            follow_up.retain(|a| !matches!(a, AppAction::Render));
                        }
                        pending_actions.extend(follow_up);

                        for event in self.flush_outgoing().await {
                            pending_actions.extend(self.app.handle(event));
                        }
                    },
                }
            }
        }
        Ok(false)
    }

    /// Process events from Bridge back to App.
    async fn process_bridge_events(&mut self, events: Vec<AppEvent>) -> Result<bool, D::Error> {
        for event in events {
            let actions = self.app.handle(event);
            if self.process_actions(actions).await? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Execute pending transport commands.
    ///
    /// Transport failures are not fatal: a socket that cannot be opened or
    /// written to is reported to the session as closed.
    async fn flush_outgoing(&mut self) -> Vec<AppEvent> {
        let mut events = Vec::new();

        loop {
            let commands = self.bridge.take_outgoing();
            if commands.is_empty() {
                break;
            }

            for command in commands {
                match command {
                    TransportCommand::Connect(request) => {
                        match self.driver.connect(&request).await {
                            Ok(()) => {
                                tracing::info!(username = %request.username, "socket open");
                                events.extend(self.bridge.handle_opened());
                            },
                            Err(e) => {
                                tracing::warn!(error = %e, "connect failed");
                                events.push(AppEvent::Error { message: e.to_string() });
                                events.extend(self.bridge.handle_closed());
                            },
                        }
                    },
                    TransportCommand::Send(message) => {
                        if let Err(e) = self.driver.send(message).await {
                            tracing::warn!(error = %e, "send failed");
                            self.driver.disconnect();
                            events.extend(self.bridge.handle_closed());
                        }
                    },
                    TransportCommand::Close => self.driver.disconnect(),
                }
            }
        }

        events
    }

    /// Get a reference to the App
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a mutable reference to the App
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }

    /// Get a reference to the Bridge
    pub fn bridge(&self) -> &Bridge {
        &self.bridge
    }

    /// Get a reference to the Driver
    pub fn driver(&self) -> &D {
        &self.driver
    }
}
