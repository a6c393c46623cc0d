//! Background tasks module
//!
//! This module contains the periodic countdown task that runs while a
//! session is counting down.

pub mod tick_driver;

// Re-export main items
pub use tick_driver::{spawn_tick_driver, TickHandle, TICK_PERIOD};
