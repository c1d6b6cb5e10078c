//! Timer session lifecycle
//!
//! `Idle -> Configured -> Running <-> Paused -> Completed`, with reset taking
//! any configured session back to `Configured`, and discard back to `Idle`.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    services::recorder::{self, RecordError, WorkoutLogRecord},
    timer::{advance, ConfigError, TimerConfiguration, TimerEvent},
    utils::format_clock,
};

use super::TimerState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    Idle,
    Configured,
    Running,
    Paused,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("no timer configured")]
    NotConfigured,

    #[error("timer is already running")]
    AlreadyRunning,

    #[error("timer is not running")]
    NotRunning,

    #[error("timer already completed; reset or reconfigure to start again")]
    AlreadyCompleted,

    #[error("pause the timer before logging the session")]
    StillRunning,

    #[error("nothing to record; the timer has not been started")]
    NothingToRecord,

    #[error("session has no linked workout")]
    NoLinkedWorkout,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Record(#[from] RecordError),
}

/// Workout the session was started from, if any
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedWorkout {
    pub id: String,
    pub name: String,
}

/// Read-only view of a session for UI collaborators
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub phase: SessionPhase,
    pub config: Option<TimerConfiguration>,
    pub state: Option<TimerState>,
    /// `MM:SS` rendering of `elapsed_or_remaining`
    pub clock: String,
    pub label: String,
    pub workout: Option<LinkedWorkout>,
}

/// Result of applying one tick to a running session
#[derive(Debug, Clone)]
pub struct TickReport {
    pub snapshot: TimerSnapshot,
    pub state: TimerState,
    pub events: Vec<TimerEvent>,
    pub completed: bool,
}

#[derive(Debug)]
pub struct TimerSession {
    phase: SessionPhase,
    config: Option<TimerConfiguration>,
    state: Option<TimerState>,
    workout: Option<LinkedWorkout>,
    /// Bumped on every transition that invalidates an in-flight clock driver
    run_id: u64,
}

impl TimerSession {
    pub fn new() -> Self {
        Self {
            phase: SessionPhase::Idle,
            config: None,
            state: None,
            workout: None,
            run_id: 0,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn config(&self) -> Option<&TimerConfiguration> {
        self.config.as_ref()
    }

    pub fn state(&self) -> Option<&TimerState> {
        self.state.as_ref()
    }

    pub fn workout(&self) -> Option<&LinkedWorkout> {
        self.workout.as_ref()
    }

    pub fn run_id(&self) -> u64 {
        self.run_id
    }

    /// Apply a configuration, replacing whatever session was there
    pub fn configure(
        &mut self,
        config: TimerConfiguration,
        workout: Option<LinkedWorkout>,
    ) -> Result<TimerSnapshot, SessionError> {
        config.validate()?;

        info!("Configuring {} timer ({}s)", config.mode(), config.initial_value());
        self.state = Some(TimerState::initial(&config));
        self.config = Some(config);
        self.workout = workout;
        self.phase = SessionPhase::Configured;
        self.run_id += 1;
        Ok(self.snapshot())
    }

    /// Start or resume; returns the run id the clock driver must tick with
    pub fn start(&mut self) -> Result<u64, SessionError> {
        match self.phase {
            SessionPhase::Idle => return Err(SessionError::NotConfigured),
            SessionPhase::Running => return Err(SessionError::AlreadyRunning),
            SessionPhase::Completed => return Err(SessionError::AlreadyCompleted),
            SessionPhase::Configured | SessionPhase::Paused => {}
        }

        let state = self.state.as_mut().ok_or(SessionError::NotConfigured)?;
        state.is_running = true;
        self.phase = SessionPhase::Running;
        self.run_id += 1;
        info!("Timer running (run {})", self.run_id);
        Ok(self.run_id)
    }

    /// Manual stop that keeps the state for a later resume
    pub fn pause(&mut self) -> Result<(), SessionError> {
        if self.phase != SessionPhase::Running {
            return Err(SessionError::NotRunning);
        }

        let state = self.state.as_mut().ok_or(SessionError::NotConfigured)?;
        state.is_running = false;
        self.phase = SessionPhase::Paused;
        self.run_id += 1;
        info!("Timer paused at {}", format_clock(state.elapsed_or_remaining));
        Ok(())
    }

    /// Back to the configuration's initial values, from any configured phase
    pub fn reset(&mut self) -> Result<TimerSnapshot, SessionError> {
        let config = self.config.as_ref().ok_or(SessionError::NotConfigured)?;
        match self.state.as_mut() {
            Some(state) => state.reset(config),
            None => self.state = Some(TimerState::initial(config)),
        }
        self.phase = SessionPhase::Configured;
        self.run_id += 1;
        info!("Timer reset");
        Ok(self.snapshot())
    }

    /// Drop the session without recording it
    pub fn discard(&mut self) {
        if self.phase != SessionPhase::Idle {
            info!("Discarding {:?} timer session", self.phase);
        }
        self.phase = SessionPhase::Idle;
        self.config = None;
        self.state = None;
        self.workout = None;
        self.run_id += 1;
    }

    /// Apply one clock tick issued for `run_id`.
    ///
    /// Ticks from a superseded driver, or that land after a pause, are
    /// ignored and yield `None`.
    pub fn tick(&mut self, run_id: u64) -> Option<TickReport> {
        if run_id != self.run_id || self.phase != SessionPhase::Running {
            debug!(
                "Ignoring stale tick (run {}, current run {}, phase {:?})",
                run_id, self.run_id, self.phase
            );
            return None;
        }

        let (Some(config), Some(state)) = (self.config.as_ref(), self.state.as_mut()) else {
            return None;
        };
        debug_assert!(
            state.is_running && !state.is_completed,
            "running session holds a stopped timer state"
        );

        let (next, events) = advance(state, config);
        *state = next;
        let completed = state.is_completed;
        let state = state.clone();

        debug!(
            "Tick: {} round {} resting={}",
            format_clock(state.elapsed_or_remaining),
            state.current_round,
            state.is_resting
        );

        if completed {
            self.phase = SessionPhase::Completed;
            info!("Timer completed");
        }

        Some(TickReport {
            snapshot: self.snapshot(),
            state,
            events,
            completed,
        })
    }

    /// Record the session for its linked workout and return to `Idle`.
    ///
    /// Allowed once completed, or while paused as a manual "stop and log".
    pub fn finish(
        &mut self,
        notes: Option<String>,
        feeling: u8,
    ) -> Result<WorkoutLogRecord, SessionError> {
        match self.phase {
            SessionPhase::Idle | SessionPhase::Configured => {
                return Err(SessionError::NothingToRecord)
            }
            SessionPhase::Running => return Err(SessionError::StillRunning),
            SessionPhase::Paused | SessionPhase::Completed => {}
        }

        let workout = self.workout.as_ref().ok_or(SessionError::NoLinkedWorkout)?;
        let (Some(config), Some(state)) = (self.config.as_ref(), self.state.as_ref()) else {
            return Err(SessionError::NothingToRecord);
        };

        let record = recorder::finalize(config, state, &workout.id, notes, feeling)?;
        self.discard();
        Ok(record)
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        let (clock, label) = match (self.config.as_ref(), self.state.as_ref()) {
            (Some(config), Some(state)) => (
                format_clock(state.elapsed_or_remaining),
                state.label(config, self.workout.as_ref().map(|w| w.name.as_str())),
            ),
            _ => (format_clock(0), "Timer".to_string()),
        };

        TimerSnapshot {
            phase: self.phase,
            config: self.config,
            state: self.state.clone(),
            clock,
            label,
            workout: self.workout.clone(),
        }
    }
}

impl Default for TimerSession {
    fn default() -> Self {
        Self::new()
    }
}
