//! Timer events broadcast to subscribers

use serde::{Deserialize, Serialize};

use crate::services::Notification;
use super::Phase;

/// Something observers of the timer may want to react to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum TimerEvent {
    /// The timer moved between idle, running and paused
    PhaseChanged(Phase),
    /// A countdown reached zero
    Completed(Notification),
}
