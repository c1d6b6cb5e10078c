//! Main application state management

use std::{
    ops::ControlFlow,
    sync::{Arc, Mutex, MutexGuard},
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::{
    services::{diary::WorkoutDiary, notifier::Notifier, recorder::WorkoutLogRecord},
    tasks::ClockDriver,
    timer::{TimerConfiguration, TimerSettings},
    workouts::{Workout, WorkoutCatalog},
};

use super::{LinkedWorkout, SessionError, TimerSession, TimerSnapshot};

#[derive(Debug, Error)]
pub enum StateError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("unknown workout: {0}")]
    UnknownWorkout(String),

    #[error("failed to lock {0}")]
    Poisoned(&'static str),
}

fn lock<'a, T>(mutex: &'a Mutex<T>, what: &'static str) -> Result<MutexGuard<'a, T>, StateError> {
    mutex.lock().map_err(|e| {
        error!("Failed to lock {}: {}", what, e);
        StateError::Poisoned(what)
    })
}

/// Shared application state: the timer session and its collaborators
#[derive(Debug)]
pub struct AppState {
    /// The single timer session
    pub session: Arc<Mutex<TimerSession>>,
    /// Owner of the ticking task; always locked before `session`
    pub clock: Mutex<ClockDriver>,
    /// Recorded sessions
    pub diary: Arc<Mutex<WorkoutDiary>>,
    pub workouts: WorkoutCatalog,
    /// Phase/round/completion notifications for cue listeners
    pub notifier: Notifier,
    /// Configuration applied at startup and on discard
    pub default_config: TimerConfiguration,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Channel for timer snapshot updates
    pub timer_update_tx: watch::Sender<TimerSnapshot>,
    /// Keep the receiver alive to prevent channel closure
    pub _timer_update_rx: watch::Receiver<TimerSnapshot>,
}

impl AppState {
    /// Create the state with the default timer already configured
    pub fn new(
        port: u16,
        host: String,
        default_config: TimerConfiguration,
        tick_period: Duration,
    ) -> Result<Self, StateError> {
        let mut session = TimerSession::new();
        let snapshot = session.configure(default_config, None)?;
        let (timer_update_tx, timer_update_rx) = watch::channel(snapshot);

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            clock: Mutex::new(ClockDriver::new(tick_period)),
            diary: Arc::new(Mutex::new(WorkoutDiary::new())),
            workouts: WorkoutCatalog::sample(),
            notifier: Notifier::new(),
            default_config,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            timer_update_tx,
            _timer_update_rx: timer_update_rx,
        })
    }

    /// Configure a free-standing timer from settings-form input
    pub fn configure_timer(&self, settings: &TimerSettings) -> Result<TimerSnapshot, StateError> {
        let config = TimerConfiguration::from_settings(settings).map_err(SessionError::from)?;
        self.apply_configuration("configure", config, None)
    }

    /// Configure the timer for a workout from the catalog
    pub fn configure_from_workout(&self, workout_id: &str) -> Result<TimerSnapshot, StateError> {
        let workout = self
            .workouts
            .find(workout_id)
            .ok_or_else(|| StateError::UnknownWorkout(workout_id.to_string()))?;
        info!("Starting timer for workout {} ({})", workout.name, workout.id);
        self.apply_configuration(
            "configure-workout",
            workout.timer_configuration(),
            Some(workout.link()),
        )
    }

    fn apply_configuration(
        &self,
        action: &str,
        config: TimerConfiguration,
        workout: Option<LinkedWorkout>,
    ) -> Result<TimerSnapshot, StateError> {
        let mut clock = lock(&self.clock, "clock driver")?;
        clock.stop();

        let snapshot = lock(&self.session, "timer session")?.configure(config, workout)?;
        drop(clock);

        self.record_action(action);
        self.publish_snapshot(snapshot.clone());
        Ok(snapshot)
    }

    /// Start or resume the timer and hand a fresh clock driver to the session
    pub fn start_timer(self: &Arc<Self>) -> Result<TimerSnapshot, StateError> {
        let mut clock = lock(&self.clock, "clock driver")?;

        let (run_id, snapshot) = {
            let mut session = lock(&self.session, "timer session")?;
            let run_id = session.start()?;
            (run_id, session.snapshot())
        };

        let state = Arc::clone(self);
        clock.start(move || state.on_tick(run_id));
        drop(clock);

        self.record_action("start");
        self.publish_snapshot(snapshot.clone());
        Ok(snapshot)
    }

    /// Manual stop without reset
    pub fn pause_timer(&self) -> Result<TimerSnapshot, StateError> {
        let mut clock = lock(&self.clock, "clock driver")?;
        clock.stop();

        let snapshot = {
            let mut session = lock(&self.session, "timer session")?;
            session.pause()?;
            session.snapshot()
        };
        drop(clock);

        self.record_action("pause");
        self.publish_snapshot(snapshot.clone());
        Ok(snapshot)
    }

    /// Stop the clock, then return the session to its initial values
    pub fn reset_timer(&self) -> Result<TimerSnapshot, StateError> {
        let mut clock = lock(&self.clock, "clock driver")?;
        clock.reset();

        let snapshot = lock(&self.session, "timer session")?.reset()?;
        drop(clock);

        self.record_action("reset");
        self.publish_snapshot(snapshot.clone());
        Ok(snapshot)
    }

    /// Leave the timer without recording; falls back to the default timer
    pub fn discard_session(&self) -> Result<TimerSnapshot, StateError> {
        let mut clock = lock(&self.clock, "clock driver")?;
        clock.stop();

        let snapshot = {
            let mut session = lock(&self.session, "timer session")?;
            session.discard();
            session.configure(self.default_config, None)?
        };
        drop(clock);

        self.record_action("discard");
        self.publish_snapshot(snapshot.clone());
        Ok(snapshot)
    }

    /// Record the session in the diary
    pub fn finish_session(
        &self,
        notes: Option<String>,
        feeling: u8,
    ) -> Result<WorkoutLogRecord, StateError> {
        let mut clock = lock(&self.clock, "clock driver")?;

        let (record, snapshot) = {
            let mut session = lock(&self.session, "timer session")?;
            let record = session.finish(notes, feeling)?;
            clock.stop();
            let snapshot = session.configure(self.default_config, None)?;
            (record, snapshot)
        };
        drop(clock);

        lock(&self.diary, "workout diary")?.append(record.clone());

        self.record_action("finish");
        self.publish_snapshot(snapshot);
        Ok(record)
    }

    /// Apply one tick from the clock driver issued for `run_id`
    pub fn on_tick(&self, run_id: u64) -> ControlFlow<()> {
        let report = match self.session.lock() {
            Ok(mut session) => session.tick(run_id),
            Err(e) => {
                error!("Failed to lock timer session on tick: {}", e);
                return ControlFlow::Break(());
            }
        };

        // A stale driver stops itself
        let Some(report) = report else {
            return ControlFlow::Break(());
        };

        self.notifier.publish(&report.events, &report.state);
        self.publish_snapshot(report.snapshot);

        if report.completed {
            info!("Timer session completed");
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }

    /// Current timer snapshot
    pub fn get_timer_snapshot(&self) -> Result<TimerSnapshot, StateError> {
        Ok(lock(&self.session, "timer session")?.snapshot())
    }

    /// Recorded sessions, oldest first
    pub fn get_diary(&self) -> Result<Vec<WorkoutLogRecord>, StateError> {
        Ok(lock(&self.diary, "workout diary")?.list().to_vec())
    }

    pub fn get_workouts(&self) -> &[Workout] {
        self.workouts.list()
    }

    /// Watch timer snapshots as they change
    pub fn subscribe_timer(&self) -> watch::Receiver<TimerSnapshot> {
        self.timer_update_tx.subscribe()
    }

    /// Stop ticking before the state goes away
    pub fn shutdown(&self) {
        match self.clock.lock() {
            Ok(mut clock) => clock.stop(),
            Err(e) => warn!("Failed to lock clock driver on shutdown: {}", e),
        }
    }

    fn publish_snapshot(&self, snapshot: TimerSnapshot) {
        if let Err(e) = self.timer_update_tx.send(snapshot) {
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
