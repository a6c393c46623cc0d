use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use focus_timer::{
    dial::Point,
    services::{AmbientAudio, Notification, Notifier},
    state::{AppState, Phase, TickOutcome, TimerEvent},
};
use tokio::time::sleep;

#[derive(Default)]
struct RecordingNotifier {
    received: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    fn count(&self) -> usize {
        self.received.lock().unwrap().len()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: &Notification) {
        self.received.lock().unwrap().push(notification.clone());
    }
}

fn app(minutes: i64) -> Arc<AppState> {
    Arc::new(AppState::new(0, "127.0.0.1".to_string(), minutes, AmbientAudio::default()))
}

fn app_with_notifier(minutes: i64) -> (Arc<AppState>, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::default());
    let state = AppState::new(0, "127.0.0.1".to_string(), minutes, AmbientAudio::default())
        .with_notifier(notifier.clone());
    (Arc::new(state), notifier)
}

/// Sleep past `secs` whole ticks without landing on a tick boundary
async fn ticks(secs: u64) {
    sleep(Duration::from_millis(secs * 1000 + 500)).await;
}

#[tokio::test(start_paused = true)]
async fn test_running_timer_counts_down_once_per_second() {
    let state = app(25);
    state.start().unwrap();
    assert!(state.has_tick_driver().unwrap());

    ticks(5).await;
    let timer = state.get_timer_state().unwrap();
    assert_eq!(timer.remaining_seconds, 1495);
    assert!(timer.is_active);
    assert_eq!(timer.formatted_time(), "24:55");
}

#[tokio::test(start_paused = true)]
async fn test_default_session_completes_exactly_once() {
    let (state, notifier) = app_with_notifier(25);
    let mut events = state.subscribe_events();

    state.start().unwrap();
    ticks(1500).await;

    let snapshot = state.snapshot().unwrap();
    assert_eq!(snapshot.timer.remaining_seconds, 0);
    assert!(snapshot.timer.is_completed());
    assert!(!snapshot.timer.is_active);
    assert!(!snapshot.timer.is_paused);
    assert!(!snapshot.audio.playing);
    assert!(!state.has_tick_driver().unwrap());
    assert_eq!(notifier.count(), 1);

    let last = snapshot.last_notification.expect("completion notification");
    assert_eq!(last.title, "Session Complete!");
    assert_eq!(last.description, "Great focus session! Take a break.");

    // Nothing happens after completion
    ticks(120).await;
    assert_eq!(state.get_timer_state().unwrap().remaining_seconds, 0);
    assert_eq!(notifier.count(), 1);

    let mut completions = 0;
    let mut phases = Vec::new();
    while let Ok(event) = events.try_recv() {
        match event {
            TimerEvent::Completed(_) => completions += 1,
            TimerEvent::PhaseChanged(phase) => phases.push(phase),
        }
    }
    assert_eq!(completions, 1);
    assert_eq!(phases, vec![Phase::Running, Phase::Idle]);
}

#[tokio::test(start_paused = true)]
async fn test_drag_then_pause_rejects_reconfiguration() {
    let state = app(25);
    let geometry = state.geometry();

    let press = state.press_dial(geometry.handle_position(25)).unwrap();
    assert!(press.accepted);
    assert!(state.snapshot().unwrap().dragging);

    let moved = state.move_dial(geometry.handle_position(10)).unwrap();
    assert!(moved.accepted);
    assert_eq!(moved.timer.session_minutes, 10);
    assert_eq!(moved.timer.total_seconds, 600);

    assert!(state.release_dial().unwrap().accepted);
    assert!(!state.snapshot().unwrap().dragging);

    state.start().unwrap();
    ticks(5).await;
    let paused = state.pause().unwrap();
    assert!(paused.accepted);
    assert_eq!(paused.timer.remaining_seconds, 595);
    assert!(paused.timer.is_active);
    assert!(paused.timer.is_paused);

    let rejected = state.set_session_minutes(5).unwrap();
    assert!(!rejected.accepted);
    assert_eq!(rejected.timer.remaining_seconds, 595);
    assert_eq!(rejected.timer.total_seconds, 600);
}

#[tokio::test(start_paused = true)]
async fn test_pause_and_reset_cancel_the_driver() {
    let state = app(25);
    state.start().unwrap();
    ticks(3).await;

    state.pause().unwrap();
    assert!(!state.has_tick_driver().unwrap());
    ticks(30).await;
    assert_eq!(state.get_timer_state().unwrap().remaining_seconds, 1497);

    state.toggle().unwrap();
    assert!(state.has_tick_driver().unwrap());
    ticks(2).await;
    assert_eq!(state.get_timer_state().unwrap().remaining_seconds, 1495);

    let reset = state.reset().unwrap();
    assert_eq!(reset.timer.remaining_seconds, 1500);
    assert_eq!(reset.timer.phase(), Phase::Idle);
    assert!(!state.has_tick_driver().unwrap());
    ticks(30).await;
    assert_eq!(state.get_timer_state().unwrap().remaining_seconds, 1500);
}

#[tokio::test(start_paused = true)]
async fn test_rapid_toggling_keeps_a_single_driver() {
    let state = app(1);
    for _ in 0..10 {
        state.toggle().unwrap();
        state.toggle().unwrap();
    }
    state.toggle().unwrap();
    assert_eq!(state.get_timer_state().unwrap().phase(), Phase::Running);

    ticks(4).await;
    assert_eq!(state.get_timer_state().unwrap().remaining_seconds, 56);
}

#[tokio::test(start_paused = true)]
async fn test_toggle_round_trip() {
    let state = app(25);
    assert_eq!(state.toggle().unwrap().timer.phase(), Phase::Running);
    assert_eq!(state.toggle().unwrap().timer.phase(), Phase::Paused);
    assert_eq!(state.toggle().unwrap().timer.phase(), Phase::Running);
}

#[tokio::test(start_paused = true)]
async fn test_audio_follows_timer() {
    let state = app(25);
    assert!(!state.snapshot().unwrap().audio.playing);

    state.start().unwrap();
    assert!(state.snapshot().unwrap().audio.playing);

    state.pause().unwrap();
    assert!(!state.snapshot().unwrap().audio.playing);

    state.toggle().unwrap();
    let muted = state.toggle_audio().unwrap();
    assert!(!muted.enabled);
    assert!(!muted.playing);
    assert_eq!(muted.status, "Audio disabled");

    let unmuted = state.toggle_audio().unwrap();
    assert!(unmuted.playing);
    assert_eq!(unmuted.status, "Playing ambient focus sound");

    state.reset().unwrap();
    assert_eq!(state.snapshot().unwrap().audio.status, "Ambient sound ready");
}

#[tokio::test(start_paused = true)]
async fn test_dial_is_locked_while_active() {
    let state = app(25);
    let geometry = state.geometry();

    state.start().unwrap();
    let press = state.press_dial(geometry.handle_position(25)).unwrap();
    assert!(!press.accepted);
    assert!(!state.snapshot().unwrap().dragging);

    let moved = state.move_dial(Point::new(100.0, 190.0)).unwrap();
    assert!(!moved.accepted);
    assert_eq!(moved.timer.session_minutes, 25);
}

#[tokio::test(start_paused = true)]
async fn test_starting_ends_the_drag() {
    let state = app(25);
    let geometry = state.geometry();

    assert!(state.press_dial(geometry.handle_position(25)).unwrap().accepted);
    state.start().unwrap();
    assert!(!state.snapshot().unwrap().dragging);

    state.reset().unwrap();
    let moved = state.move_dial(Point::new(100.0, 190.0)).unwrap();
    assert!(!moved.accepted);
    assert_eq!(moved.timer.session_minutes, 25);
    assert!(!state.release_dial().unwrap().accepted);
}

#[tokio::test(start_paused = true)]
async fn test_press_off_handle_is_ignored() {
    let state = app(25);
    let press = state.press_dial(Point::new(100.0, 100.0)).unwrap();
    assert!(!press.accepted);
    assert_eq!(press.timer.session_minutes, 25);

    let moved = state.move_dial(Point::new(100.0, 190.0)).unwrap();
    assert!(!moved.accepted);
}

#[tokio::test(start_paused = true)]
async fn test_minutes_controls_clamp_and_lock() {
    let state = app(60);
    assert_eq!(state.adjust_minutes(1).unwrap().timer.session_minutes, 60);
    assert_eq!(state.set_session_minutes(0).unwrap().timer.session_minutes, 1);
    assert_eq!(state.adjust_minutes(-1).unwrap().timer.session_minutes, 1);
    assert_eq!(state.adjust_minutes(1).unwrap().timer.total_seconds, 120);

    state.start().unwrap();
    let locked = state.adjust_minutes(1).unwrap();
    assert!(!locked.accepted);
    assert_eq!(locked.timer.session_minutes, 2);
}

#[tokio::test(start_paused = true)]
async fn test_timer_updates_are_published() {
    let state = app(2);
    let mut updates = state.subscribe_timer();

    state.start().unwrap();
    ticks(1).await;
    assert!(updates.has_changed().unwrap());
    assert_eq!(updates.borrow_and_update().remaining_seconds, 119);
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_releases_everything() {
    let state = app(25);
    let geometry = state.geometry();
    assert!(state.press_dial(geometry.handle_position(25)).unwrap().accepted);
    state.shutdown();
    assert!(!state.snapshot().unwrap().dragging);

    state.start().unwrap();
    state.shutdown();
    assert!(!state.has_tick_driver().unwrap());
    assert!(!state.snapshot().unwrap().audio.playing);

    let remaining = state.get_timer_state().unwrap().remaining_seconds;
    ticks(10).await;
    assert_eq!(state.get_timer_state().unwrap().remaining_seconds, remaining);
}

#[tokio::test(start_paused = true)]
async fn test_restarting_a_finished_timer_does_not_notify_again() {
    let (state, notifier) = app_with_notifier(1);
    let mut events = state.subscribe_events();

    state.start().unwrap();
    ticks(60).await;
    assert_eq!(notifier.count(), 1);
    assert!(state.get_timer_state().unwrap().is_completed());

    let restarted = state.toggle().unwrap();
    assert_eq!(restarted.timer.phase(), Phase::Running);
    assert_eq!(restarted.timer.formatted_time(), "00:00");

    ticks(2).await;
    let timer = state.get_timer_state().unwrap();
    assert_eq!(timer.remaining_seconds, 0);
    assert!(!timer.is_active);
    assert!(!state.has_tick_driver().unwrap());
    assert_eq!(notifier.count(), 1);

    let completions = std::iter::from_fn(|| events.try_recv().ok())
        .filter(|event| matches!(event, TimerEvent::Completed(_)))
        .count();
    assert_eq!(completions, 1);

    // A fresh run after reset is a new session
    state.reset().unwrap();
    state.start().unwrap();
    ticks(60).await;
    assert_eq!(notifier.count(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_ticks_from_stale_drivers_are_ignored() {
    let state = app(1);
    state.start().unwrap();
    let first = state.tick_generation().unwrap().expect("driver running");

    assert_eq!(state.tick(first + 100).unwrap(), TickOutcome::Ignored);
    assert_eq!(state.get_timer_state().unwrap().remaining_seconds, 60);

    state.pause().unwrap();
    assert_eq!(state.tick_generation().unwrap(), None);
    assert_eq!(state.tick(first).unwrap(), TickOutcome::Ignored);
    assert_eq!(state.get_timer_state().unwrap().remaining_seconds, 60);

    state.toggle().unwrap();
    let second = state.tick_generation().unwrap().expect("driver running");
    assert_ne!(first, second);
    assert_eq!(state.tick(first).unwrap(), TickOutcome::Ignored);
    assert_eq!(state.get_timer_state().unwrap().remaining_seconds, 60);

    assert_eq!(state.tick(second).unwrap(), TickOutcome::Advanced);
    assert_eq!(state.get_timer_state().unwrap().remaining_seconds, 59);

    state.reset().unwrap();
    assert_eq!(state.tick(second).unwrap(), TickOutcome::Ignored);
    assert_eq!(state.get_timer_state().unwrap().remaining_seconds, 60);
}

#[tokio::test(start_paused = true)]
async fn test_custom_tick_period() {
    let state = Arc::new(
        AppState::new(0, "127.0.0.1".to_string(), 25, AmbientAudio::default())
            .with_tick_period(Duration::from_millis(100)),
    );
    state.start().unwrap();
    sleep(Duration::from_millis(350)).await;
    assert_eq!(state.get_timer_state().unwrap().remaining_seconds, 1497);
}
