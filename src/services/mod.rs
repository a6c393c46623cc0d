//! Collaborators driven by the timer
//!
//! This module contains the ambient audio companion and the notification
//! delivery used when a session completes.

pub mod audio;
pub mod notifications;

// Re-export main types
pub use audio::{AmbientAudio, AudioStatus, AmbientLayer, AMBIENT_LAYERS, MASTER_GAIN};
pub use notifications::{LogNotifier, Notification, Notifier};
