//! Deterministic simulation harness for dropfour client testing.
//!
//! [`SimDriver`] implements [`dropfour_app::Driver`] with scripted input and
//! captured output, so the production [`dropfour_app::Runtime`] can be driven
//! step by step without a terminal or a socket.
//!
//! # Model-Based Testing
//!
//! The `model` module provides a reference implementation of the session
//! state machine. Operations are applied to both the model and the real
//! [`dropfour_client::Session`], and their observable states are compared.
//!
//! # Invariant Testing
//!
//! The `invariants` module checks what the App shows after each frame: a
//! board whenever a game is on, one colour per game, and a cursor on the
//! board. [`InvariantRegistry::standard()`] holds every check.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod invariants;
pub mod model;
pub mod sim_driver;

pub use invariants::{
    ClientSnapshot, ColorFixedWithinGame, CursorWithinBoard, GameStateHasBoard, Invariant,
    InvariantRegistry, InvariantResult, NoticeLogBounded, ResultOnlyAfterGameOver,
    SystemSnapshot, Violation,
};
pub use model::{ModelSession, ObservableState, Operation};
pub use sim_driver::{DriverCall, SimDriver, SimDriverError};
