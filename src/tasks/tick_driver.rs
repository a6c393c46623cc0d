//! One-second countdown driver

use std::{sync::Weak, time::Duration};
use tokio::{
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::{debug, error, info};

use crate::state::{timer_state::TickOutcome, AppState};

/// Period between countdown ticks
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Handle to the running countdown task.
///
/// Dropping the handle aborts the task. Every tick carries the handle's
/// generation, and the state only accepts ticks from the generation it
/// currently holds, so a tick already in flight when the handle is dropped
/// is discarded.
#[derive(Debug)]
pub struct TickHandle {
    generation: u64,
    task: JoinHandle<()>,
}

impl TickHandle {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Stop the driver
    pub fn cancel(self) {
        debug!("Cancelling tick driver #{}", self.generation);
        // abort happens in Drop
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Spawn the countdown driver. The first tick fires one `period` after the call.
pub fn spawn_tick_driver(state: Weak<AppState>, generation: u64, period: Duration) -> TickHandle {
    let task = tokio::spawn(async move {
        debug!("Tick driver #{} started", generation);

        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;

            let Some(state) = state.upgrade() else {
                debug!("Timer state dropped, stopping tick driver #{}", generation);
                break;
            };

            match state.tick(generation) {
                Ok(TickOutcome::Advanced) => {}
                Ok(TickOutcome::Completed) => {
                    info!("Countdown finished, tick driver #{} exiting", generation);
                    break;
                }
                Ok(TickOutcome::Ignored) => {
                    debug!("Tick driver #{} is stale, exiting", generation);
                    break;
                }
                Err(e) => {
                    error!("Failed to advance timer: {}", e);
                    break;
                }
            }
        }
    });

    TickHandle { generation, task }
}
