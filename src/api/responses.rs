//! API response structures

use chrono::{DateTime, Local, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    dial::DialGeometry,
    services::{AmbientLayer, AudioStatus, Notification},
    state::{Phase, TimerState},
};

/// Timer fields plus everything derived from them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerView {
    pub session_minutes: u32,
    pub total_seconds: u32,
    pub remaining_seconds: u32,
    pub is_active: bool,
    pub is_paused: bool,
    pub phase: Phase,
    pub progress: f64,
    pub is_completed: bool,
    pub display: String,
}

impl From<&TimerState> for TimerView {
    fn from(timer: &TimerState) -> Self {
        Self {
            session_minutes: timer.session_minutes,
            total_seconds: timer.total_seconds,
            remaining_seconds: timer.remaining_seconds,
            is_active: timer.is_active,
            is_paused: timer.is_paused,
            phase: timer.phase(),
            progress: timer.progress(),
            is_completed: timer.is_completed(),
            display: timer.formatted_time(),
        }
    }
}

/// How the dial should be drawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialView {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
    pub circumference: f64,
    pub stroke_offset: f64,
    pub handle_x: f64,
    pub handle_y: f64,
    pub handle_radius: f64,
    /// False while the timer is active; the handle cannot be dragged then
    pub interactive: bool,
    pub dragging: bool,
}

impl DialView {
    pub fn new(geometry: &DialGeometry, timer: &TimerState, dragging: bool) -> Self {
        let handle = geometry.handle_position(timer.session_minutes);
        Self {
            center_x: geometry.center.x,
            center_y: geometry.center.y,
            radius: geometry.radius,
            circumference: geometry.circumference(),
            stroke_offset: geometry.stroke_offset(timer.progress()),
            handle_x: handle.x,
            handle_y: handle.y,
            handle_radius: geometry.handle_radius,
            interactive: !timer.is_active,
            dragging,
        }
    }
}

/// API response structure for intent endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerView,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, timer: &TimerState) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            timer: TimerView::from(timer),
        }
    }

    /// Status follows the timer: "active" while a session is underway
    pub fn for_timer(message: String, timer: &TimerState) -> Self {
        let status = if timer.is_active { "active" } else { "inactive" };
        Self::new(status.to_string(), message, timer)
    }

    /// Create a response for an intent that had no effect
    pub fn ignored(message: String, timer: &TimerState) -> Self {
        Self::new("ignored".to_string(), message, timer)
    }
}

/// Full view of the timer page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub greeting: String,
    pub status_text: String,
    pub session_info: String,
    pub session_length: String,
    pub timer: TimerView,
    pub dial: DialView,
    pub audio: AudioStatus,
    pub last_notification: Option<Notification>,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Audio companion status and the recipe for rendering the ambient sound
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioResponse {
    #[serde(flatten)]
    pub audio: AudioStatus,
    pub master_gain: f32,
    pub layers: Vec<AmbientLayer>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Headline above the dial
pub fn status_text(timer: &TimerState) -> &'static str {
    match timer.phase() {
        Phase::Idle => "Ready to Focus",
        Phase::Paused => "Paused",
        Phase::Running => "Stay Focused!",
    }
}

/// Line under the headline
pub fn session_info(timer: &TimerState) -> String {
    match timer.phase() {
        Phase::Idle => "Set your focus session length".to_string(),
        Phase::Paused => "Session paused".to_string(),
        Phase::Running => format!("{} minutes remaining", timer.remaining_seconds / 60),
    }
}

pub fn session_length(timer: &TimerState) -> String {
    format!("{} minutes", timer.session_minutes)
}

/// Greeting for the local hour of day
pub fn greeting_for_hour(hour: u32) -> &'static str {
    if hour < 12 {
        "Morning Focus Time"
    } else if hour < 17 {
        "Afternoon Energy Peak"
    } else {
        "Evening Deep Work"
    }
}

pub fn greeting() -> &'static str {
    greeting_for_hour(Local::now().hour())
}
