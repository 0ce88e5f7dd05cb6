//! Reference model for model-based testing.
//!
//! [`ModelSession`] restates the session's behaviour as plainly as possible:
//! an explicit edge list for status changes and a handful of fields for what a
//! player can see. Operations are applied to both the model and a real
//! [`dropfour_client::Session`], and their [`ObservableState`]s are compared.

mod operation;
mod session;

pub use operation::Operation;
pub use session::{ModelSession, ObservableState};
