//! Clock driver: one tick per period on a single background task

use std::{ops::ControlFlow, time::Duration};

use tokio::{
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::debug;

pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_secs(1);

/// Owns the ticking task of the active session.
///
/// At most one task exists at a time: `start` replaces any previous one, and
/// dropping the driver stops it. Ticks run sequentially on that task, so the
/// callback is never re-entered.
#[derive(Debug)]
pub struct ClockDriver {
    period: Duration,
    handle: Option<JoinHandle<()>>,
}

impl ClockDriver {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            handle: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Begin ticking; `on_tick` returns `Break` to end the task on its own.
    ///
    /// The first tick lands one full period after the call, so resuming
    /// never replays time spent paused.
    pub fn start<F>(&mut self, mut on_tick: F)
    where
        F: FnMut() -> ControlFlow<()> + Send + 'static,
    {
        self.stop();

        let period = self.period;
        self.handle = Some(tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                if on_tick().is_break() {
                    debug!("Clock driver finished");
                    break;
                }
            }
        }));
        debug!("Clock driver started ({:?} period)", period);
    }

    /// Stop ticking. Safe to call when not running.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            debug!("Clock driver stopped");
        }
    }

    /// Stop and drop any pending tick along with the task's interval
    pub fn reset(&mut self) {
        self.stop();
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }
}

impl Default for ClockDriver {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_PERIOD)
    }
}

impl Drop for ClockDriver {
    fn drop(&mut self) {
        self.stop();
    }
}
