//! Terminal UI for dropfour
//!
//! A thin shell over [`dropfour_app::Driver`] that provides terminal-specific
//! I/O. All orchestration logic lives in the generic [`dropfour_app::Runtime`]
//!
//! This crate only handles terminal input and rendering.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod terminal;
pub mod ui;

pub use dropfour_app::{App, AppAction, AppEvent, Bridge, Driver, KeyInput, Runtime};
pub use terminal::{TerminalDriver, TerminalError};
