//! Client
//!
//! Game session state machine for the dropfour protocol. Owns the view of one
//! connection: its status, the last authoritative board snapshot, and the
//! identity of the current game.
//!
//! # Architecture
//!
//! The session is Sans-IO. It receives events ([`SessionEvent`]), applies the
//! transition table in [`transition`], and returns actions
//! ([`SessionAction`]) for the caller to execute. Nothing in the state
//! machine touches a socket, so every transition is testable without one.
//!
//! # Components
//!
//! - [`Session`]: the state machine for one connection
//! - [`ConnectionStatus`], [`GameSnapshot`], [`SessionIdentity`]: exposed state
//! - [`SessionEvent`] / [`SessionAction`]: inputs and side effects
//!
//! # Transport (optional)
//!
//! With the `transport` feature enabled, this crate also provides:
//! - [`transport::connect`]: open a WebSocket for a [`ConnectRequest`]
//! - [`transport::ConnectedClient`]: channel-bridged socket handle
//! - [`leaderboard::fetch_leaderboard`]: the leaderboard read path

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod event;
mod session;
mod state;
mod transition;

#[cfg(feature = "transport")]
mod endpoint;
#[cfg(feature = "transport")]
pub mod leaderboard;
#[cfg(feature = "transport")]
pub mod transport;

#[cfg(feature = "transport")]
pub use endpoint::Endpoint;
pub use event::{ConnectRequest, Notice, SessionAction, SessionEvent};
pub use session::Session;
pub use state::{ConnectionStatus, GameSnapshot, MoveIntent, SessionIdentity};
pub use transition::transition;
