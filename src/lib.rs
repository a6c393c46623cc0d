//! Focus Timer - a countdown timer service with a drag-to-set dial
//!
//! This library provides the countdown state machine, the dial geometry that
//! maps pointer drags to session lengths, and an HTTP API that drives both
//! alongside an ambient sound companion.

pub mod config;
pub mod dial;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{AppState, TimerState};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
