//! Main application state management

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, watch};
use tracing::{debug, error, info, warn};

use crate::{
    dial::{DialGeometry, DragSession, Point},
    services::{AmbientAudio, AudioStatus, LogNotifier, Notification, Notifier},
    tasks::{spawn_tick_driver, TickHandle, TICK_PERIOD},
};
use super::{timer_state::TickOutcome, Phase, TimerEvent, TimerState};

/// Everything that has to change together under one lock
#[derive(Debug)]
struct Controller {
    timer: TimerState,
    driver: Option<TickHandle>,
    next_generation: u64,
    drag: Option<DragSession>,
    audio: AmbientAudio,
}

/// Result of forwarding a user intent to the timer
#[derive(Debug, Clone)]
pub struct Outcome {
    /// False when the intent was ignored in the current state
    pub accepted: bool,
    pub timer: TimerState,
}

/// Consistent copy of everything the view renders
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub timer: TimerState,
    pub dragging: bool,
    pub audio: AudioStatus,
    pub last_notification: Option<Notification>,
}

/// Main application state: owns the timer, its tick driver, the dial drag
/// session and the audio companion
pub struct AppState {
    controller: Mutex<Controller>,
    notifier: Arc<dyn Notifier>,
    geometry: DialGeometry,
    tick_period: Duration,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    last_action: Mutex<Option<String>>,
    last_action_time: Mutex<Option<DateTime<Utc>>>,
    last_notification: Mutex<Option<Notification>>,
    /// Channel for phase changes and completions
    pub event_tx: broadcast::Sender<TimerEvent>,
    /// Channel for timer updates
    pub timer_update_tx: watch::Sender<TimerState>,
    /// Keep the receiver alive to prevent channel closure
    _timer_update_rx: watch::Receiver<TimerState>,
}

impl AppState {
    /// Create a new AppState with an idle timer of `session_minutes` (clamped)
    pub fn new(port: u16, host: String, session_minutes: i64, audio: AmbientAudio) -> Self {
        let timer = TimerState::with_minutes(session_minutes);
        let (event_tx, _) = broadcast::channel(100);
        let (timer_update_tx, timer_update_rx) = watch::channel(timer.clone());

        Self {
            controller: Mutex::new(Controller {
                timer,
                driver: None,
                next_generation: 0,
                drag: None,
                audio,
            }),
            notifier: Arc::new(LogNotifier),
            geometry: DialGeometry::default(),
            tick_period: TICK_PERIOD,
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
            last_notification: Mutex::new(None),
            event_tx,
            timer_update_tx,
            _timer_update_rx: timer_update_rx,
        }
    }

    /// Replace the notifier used for completion messages
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Change the countdown period
    pub fn with_tick_period(mut self, period: Duration) -> Self {
        self.tick_period = period;
        self
    }

    pub fn geometry(&self) -> DialGeometry {
        self.geometry
    }

    fn lock(&self) -> Result<MutexGuard<'_, Controller>, String> {
        self.controller.lock()
            .map_err(|e| format!("Failed to lock timer state: {}", e))
    }

    /// Apply an intent, then bring the tick driver, drag session and audio in
    /// line with the resulting state
    fn apply<F>(self: &Arc<Self>, action: &str, updater: F) -> Result<Outcome, String>
    where
        F: FnOnce(&mut Controller) -> bool,
    {
        let mut controller = self.lock()?;
        let phase_before = controller.timer.phase();

        let accepted = updater(&mut *controller);
        self.reconcile(&mut *controller);

        let timer = controller.timer.clone();
        drop(controller); // Release the lock early

        if accepted {
            self.record_action(action);
        } else {
            debug!("Ignored '{}' in {:?} state", action, phase_before);
        }

        let phase = timer.phase();
        if phase != phase_before {
            info!("Timer {:?} -> {:?} ({})", phase_before, phase, timer.formatted_time());
            // No subscribers is fine
            let _ = self.event_tx.send(TimerEvent::PhaseChanged(phase));
        }
        self.publish(&timer);

        Ok(Outcome { accepted, timer })
    }

    /// Start or stop the tick driver, end drags once active and sync audio.
    /// Must be called with the controller locked.
    fn reconcile(self: &Arc<Self>, controller: &mut Controller) {
        if controller.timer.is_running() {
            if controller.driver.is_none() {
                controller.next_generation += 1;
                let generation = controller.next_generation;
                controller.driver = Some(spawn_tick_driver(
                    Arc::downgrade(self),
                    generation,
                    self.tick_period,
                ));
            }
        } else if let Some(driver) = controller.driver.take() {
            driver.cancel();
        }

        if controller.timer.is_active && controller.drag.take().is_some() {
            debug!("Timer is active, dropped dial drag session");
        }

        if controller.timer.is_running() {
            controller.audio.play();
        } else {
            controller.audio.pause();
        }
    }

    fn publish(&self, timer: &TimerState) {
        if let Err(e) = self.timer_update_tx.send(timer.clone()) {
            warn!("Failed to send timer update: {}", e);
        }
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Primary action: start, resume or pause
    pub fn toggle(self: &Arc<Self>) -> Result<Outcome, String> {
        self.apply("toggle", |c| {
            c.timer.toggle();
            true
        })
    }

    pub fn start(self: &Arc<Self>) -> Result<Outcome, String> {
        self.apply("start", |c| {
            c.timer.start();
            true
        })
    }

    pub fn pause(self: &Arc<Self>) -> Result<Outcome, String> {
        self.apply("pause", |c| {
            let running = c.timer.is_running();
            c.timer.pause();
            running
        })
    }

    /// Stop the countdown, restore the full session and silence audio
    pub fn reset(self: &Arc<Self>) -> Result<Outcome, String> {
        self.apply("reset", |c| {
            c.timer.reset();
            c.audio.stop();
            true
        })
    }

    /// Set the session length; ignored while the timer is active
    pub fn set_session_minutes(self: &Arc<Self>, minutes: i64) -> Result<Outcome, String> {
        self.apply("set-minutes", |c| {
            let idle = !c.timer.is_active;
            c.timer.set_session_minutes(minutes);
            idle
        })
    }

    /// Nudge the session length by `delta` minutes; ignored while active
    pub fn adjust_minutes(self: &Arc<Self>, delta: i64) -> Result<Outcome, String> {
        let action = if delta >= 0 { "increase-minutes" } else { "decrease-minutes" };
        self.apply(action, |c| {
            let idle = !c.timer.is_active;
            c.timer.adjust_minutes(delta);
            idle
        })
    }

    /// Pointer pressed on the dial. Starts a drag when it hits the handle of
    /// an idle timer and applies the minutes under the pointer.
    pub fn press_dial(self: &Arc<Self>, pointer: Point) -> Result<Outcome, String> {
        let geometry = self.geometry;
        self.apply("dial-press", |c| {
            if c.timer.is_active {
                return false;
            }
            let Some(session) = DragSession::begin(geometry, pointer, c.timer.session_minutes) else {
                return false;
            };
            c.timer.set_session_minutes(session.initial_minutes() as i64);
            c.drag = Some(session);
            true
        })
    }

    /// Pointer moved while dragging
    pub fn move_dial(self: &Arc<Self>, pointer: Point) -> Result<Outcome, String> {
        self.apply("dial-move", |c| {
            if c.timer.is_active {
                return false;
            }
            let Some(session) = c.drag.as_mut() else {
                return false;
            };
            let minutes = session.move_to(pointer);
            c.timer.set_session_minutes(minutes as i64);
            true
        })
    }

    /// Pointer released, ending any drag
    pub fn release_dial(self: &Arc<Self>) -> Result<Outcome, String> {
        self.apply("dial-release", |c| c.drag.take().is_some())
    }

    /// Flip the ambient audio preference and return the new audio status
    pub fn toggle_audio(self: &Arc<Self>) -> Result<AudioStatus, String> {
        let mut controller = self.lock()?;
        controller.audio.toggle_enabled();
        if controller.timer.is_running() {
            controller.audio.play();
        }
        let status = controller.audio.snapshot();
        drop(controller);

        self.record_action("toggle-audio");
        Ok(status)
    }

    /// Advance the countdown on behalf of the tick driver `generation`.
    /// Ticks from a driver that is no longer current are ignored.
    pub fn tick(&self, generation: u64) -> Result<TickOutcome, String> {
        let mut controller = self.lock()?;

        let current = controller.driver.as_ref().map(TickHandle::generation);
        if current != Some(generation) {
            return Ok(TickOutcome::Ignored);
        }

        // A run restarted at 00:00 completes again but is not a new session
        let already_completed = controller.timer.is_completed();
        let outcome = controller.timer.tick();
        match outcome {
            TickOutcome::Advanced => controller.audio.advance(1),
            TickOutcome::Completed => {
                // Dropping our own handle aborts this task at its next await
                controller.driver.take();
                controller.audio.stop();
            }
            TickOutcome::Ignored => {}
        }
        let timer = controller.timer.clone();
        drop(controller);

        self.publish(&timer);

        if outcome == TickOutcome::Completed {
            let _ = self.event_tx.send(TimerEvent::PhaseChanged(Phase::Idle));
            if already_completed {
                debug!("Timer restarted at 00:00 stopped again, not notifying");
            } else {
                self.complete_session();
            }
        }

        Ok(outcome)
    }

    fn complete_session(&self) {
        info!("Focus session complete");
        let notification = Notification::session_complete();
        self.notifier.notify(&notification);

        if let Ok(mut last) = self.last_notification.lock() {
            *last = Some(notification.clone());
        }

        let _ = self.event_tx.send(TimerEvent::Completed(notification));
    }

    /// Get current timer state
    pub fn get_timer_state(&self) -> Result<TimerState, String> {
        self.lock().map(|c| c.timer.clone())
    }

    /// Get everything the view needs in one consistent read
    pub fn snapshot(&self) -> Result<Snapshot, String> {
        let controller = self.lock()?;
        let timer = controller.timer.clone();
        let dragging = controller.drag.is_some();
        let audio = controller.audio.snapshot();
        drop(controller);

        let last_notification = self.last_notification.lock().ok().and_then(|n| n.clone());

        Ok(Snapshot { timer, dragging, audio, last_notification })
    }

    /// Whether a tick driver is currently alive
    pub fn has_tick_driver(&self) -> Result<bool, String> {
        self.tick_generation().map(|g| g.is_some())
    }

    /// Generation of the current tick driver, if one is running
    pub fn tick_generation(&self) -> Result<Option<u64>, String> {
        self.lock().map(|c| c.driver.as_ref().map(TickHandle::generation))
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<TimerEvent> {
        self.event_tx.subscribe()
    }

    pub fn subscribe_timer(&self) -> watch::Receiver<TimerState> {
        self.timer_update_tx.subscribe()
    }

    /// Release the tick driver, any drag session and audio playback
    pub fn shutdown(&self) {
        match self.lock() {
            Ok(mut controller) => {
                if let Some(driver) = controller.driver.take() {
                    driver.cancel();
                }
                controller.drag.take();
                controller.audio.stop();
                info!("Timer state released");
            }
            Err(e) => error!("Failed to release timer state: {}", e),
        }
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
