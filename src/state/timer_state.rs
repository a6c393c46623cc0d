//! Timer state structure and countdown transitions

use serde::{Deserialize, Serialize};

/// Shortest allowed session length in minutes
pub const MIN_SESSION_MINUTES: u32 = 1;
/// Longest allowed session length in minutes
pub const MAX_SESSION_MINUTES: u32 = 60;
/// Session length a fresh timer starts with
pub const DEFAULT_SESSION_MINUTES: u32 = 25;

/// Coarse lifecycle phase derived from the active/paused flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Running,
    Paused,
}

/// Result of a single one-second tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// One second was taken off the countdown
    Advanced,
    /// The countdown reached zero and the timer stopped
    Completed,
    /// The timer was not running, nothing changed
    Ignored,
}

/// Countdown state for a single focus session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub session_minutes: u32,
    pub total_seconds: u32,
    pub remaining_seconds: u32,
    pub is_active: bool,
    pub is_paused: bool,
}

impl TimerState {
    /// Create an idle timer with the default session length
    pub fn new() -> Self {
        Self::with_minutes(DEFAULT_SESSION_MINUTES as i64)
    }

    /// Create an idle timer with the given session length, clamped to 1..=60
    pub fn with_minutes(minutes: i64) -> Self {
        let session_minutes = clamp_minutes(minutes);
        let total_seconds = session_minutes * 60;
        Self {
            session_minutes,
            total_seconds,
            remaining_seconds: total_seconds,
            is_active: false,
            is_paused: false,
        }
    }

    /// Reconfigure the session length. Ignored while the timer is active,
    /// including while paused. Returns whether the state changed.
    pub fn set_session_minutes(&mut self, minutes: i64) -> bool {
        if self.is_active {
            return false;
        }

        let before = self.clone();
        let session_minutes = clamp_minutes(minutes);
        self.session_minutes = session_minutes;
        self.total_seconds = session_minutes * 60;
        self.remaining_seconds = self.total_seconds;
        *self != before
    }

    /// Nudge the session length by `delta` minutes, same rules as `set_session_minutes`
    pub fn adjust_minutes(&mut self, delta: i64) -> bool {
        self.set_session_minutes(self.session_minutes as i64 + delta)
    }

    pub fn start(&mut self) {
        self.is_active = true;
        self.is_paused = false;
    }

    pub fn pause(&mut self) {
        self.is_paused = true;
    }

    /// Primary action: start or resume when idle/paused, pause when running
    pub fn toggle(&mut self) {
        if !self.is_active || self.is_paused {
            self.start();
        } else {
            self.pause();
        }
    }

    /// Stop the timer and restore the full session length
    pub fn reset(&mut self) {
        self.is_active = false;
        self.is_paused = false;
        self.remaining_seconds = self.total_seconds;
    }

    /// Advance the countdown by one second
    pub fn tick(&mut self) -> TickOutcome {
        if !self.is_running() {
            return TickOutcome::Ignored;
        }

        if self.remaining_seconds <= 1 {
            self.remaining_seconds = 0;
            self.is_active = false;
            self.is_paused = false;
            TickOutcome::Completed
        } else {
            self.remaining_seconds -= 1;
            TickOutcome::Advanced
        }
    }

    pub fn is_running(&self) -> bool {
        self.is_active && !self.is_paused
    }

    pub fn phase(&self) -> Phase {
        match (self.is_active, self.is_paused) {
            (false, _) => Phase::Idle,
            (true, false) => Phase::Running,
            (true, true) => Phase::Paused,
        }
    }

    /// Elapsed fraction of the session in 0.0..=1.0
    pub fn progress(&self) -> f64 {
        if self.total_seconds == 0 {
            return 0.0;
        }
        (self.total_seconds - self.remaining_seconds) as f64 / self.total_seconds as f64
    }

    pub fn is_completed(&self) -> bool {
        self.remaining_seconds == 0 && self.total_seconds > 0
    }

    /// Remaining time as zero-padded `MM:SS`
    pub fn formatted_time(&self) -> String {
        format!(
            "{:02}:{:02}",
            self.remaining_seconds / 60,
            self.remaining_seconds % 60
        )
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}

/// Clamp a requested session length into the allowed range
pub fn clamp_minutes(minutes: i64) -> u32 {
    minutes.clamp(MIN_SESSION_MINUTES as i64, MAX_SESSION_MINUTES as i64) as u32
}
