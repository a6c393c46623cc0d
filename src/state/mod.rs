//! State management module
//!
//! This module contains the countdown state machine and the application
//! state that drives it.

pub mod app_state;
pub mod events;
pub mod timer_state;

// Re-export main types
pub use app_state::{AppState, Outcome, Snapshot};
pub use events::TimerEvent;
pub use timer_state::{Phase, TickOutcome, TimerState};
