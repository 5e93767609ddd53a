//! App layer - central state management and command processing
//!
//! The App actor receives UI events, applies them to the state and
//! emits a fresh render state after each one.

pub mod state;
pub mod actor;
pub mod commands;
pub mod draft;

pub use state::{AppState, Mode};
pub use actor::AppActor;
