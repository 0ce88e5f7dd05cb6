//! Application layer for dropfour
//!
//! Pure state machines and generic runtime for UI and protocol orchestration,
//! enabling deterministic simulation testing with the same code that runs in
//! production.
//!
//! # Components
//!
//! - [`App`]: UI state machine (username entry, board cursor, notices)
//! - [`BoardSurface`]: stateless board presentation and click handling
//! - [`Bridge`]: Protocol bridge (translates App actions to Session events)
//! - [`Driver`]: Trait for platform-specific I/O abstraction
//! - [`Runtime`]: Generic orchestration loop using Driver

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod app;
pub mod autoplay;
mod bridge;
mod driver;
mod event;
mod input;
mod runtime;
mod state;
mod surface;

pub use action::AppAction;
pub use app::App;
pub use bridge::{Bridge, TransportCommand};
pub use driver::{Driver, Inbound};
pub use event::AppEvent;
pub use input::{KeyInput, LineEditor};
pub use runtime::Runtime;
pub use state::{NoticeLog, Screen, SessionView};
pub use surface::{BoardSurface, CellClass, CellElement};
