//! Session completion notifications

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

/// A toast-style message shown to the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub timestamp: DateTime<Utc>,
}

impl Notification {
    pub fn new(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            timestamp: Utc::now(),
        }
    }

    /// Message shown when a focus session runs out
    pub fn session_complete() -> Self {
        Self::new("Session Complete!", "Great focus session! Take a break.")
    }
}

/// Delivers notifications to the user
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: &Notification);
}

/// Notifier that writes to the service log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: &Notification) {
        info!("{} {}", notification.title, notification.description);
    }
}
