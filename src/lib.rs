//! # Eat-'n-Split
//!
//! A small terminal bill splitter: a list of friends with running balances,
//! a form to add a friend and a form to split a bill with one of them.
//!
//! ## Features
//! - Seeded friend list with coloured balances
//! - Add friends with a generated avatar URL
//! - Split a bill: bill value, your share, who pays
//! - Friend list as JSON
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous drawing and key polling
//! - App Layer (State machine) - owns all state, one event at a time
//!
//! Everything lives in memory and is gone when the process exits.

pub mod constants;
pub mod models;
pub mod ui;
pub mod messages;
pub mod app;
pub mod logging;

// Re-export commonly used types
pub use models::{Friend, FriendId, BalanceStatus, Payer};
pub use messages::{UiEvent, RenderState};
pub use app::{AppState, AppActor, Mode};
