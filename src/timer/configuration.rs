//! Timer configuration: the five modes and their validated parameters

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// EMOM rounds default to 50 seconds of work and 10 of rest
pub const EMOM_WORK_SECONDS: u32 = 50;
pub const EMOM_REST_SECONDS: u32 = 10;
pub const EMOM_ROUNDS: u32 = 10;

/// Classic Tabata protocol
pub const TABATA_WORK_SECONDS: u32 = 20;
pub const TABATA_REST_SECONDS: u32 = 10;
pub const TABATA_ROUNDS: u32 = 8;

/// Timer mode selector, as shown in the settings form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerMode {
    Countdown,
    Stopwatch,
    #[serde(rename = "AMRAP")]
    Amrap,
    #[serde(rename = "EMOM")]
    Emom,
    Tabata,
}

impl fmt::Display for TimerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimerMode::Countdown => "Countdown",
            TimerMode::Stopwatch => "Stopwatch",
            TimerMode::Amrap => "AMRAP",
            TimerMode::Emom => "EMOM",
            TimerMode::Tabata => "Tabata",
        };
        f.write_str(name)
    }
}

/// Configuration errors, raised before any timer state exists
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{mode} timer requires a duration")]
    MissingDuration { mode: TimerMode },

    #[error("duration must not be negative (got {0})")]
    NegativeDuration(i64),

    #[error("round count must be positive (got {0})")]
    InvalidRoundCount(i64),

    #[error("work interval must be positive (got {0})")]
    InvalidWorkSeconds(i64),

    #[error("rest interval must not be negative (got {0})")]
    NegativeRestSeconds(i64),

    #[error("{field} is out of range (got {value})")]
    OutOfRange { field: &'static str, value: i64 },
}

/// Work/rest rounds shared by EMOM and Tabata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalPlan {
    pub round_count: u32,
    pub work_seconds: u32,
    pub rest_seconds: u32,
    /// Explicit starting value; defaults to `round_count * round_duration`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_duration: Option<u32>,
}

impl IntervalPlan {
    pub fn new(round_count: u32, work_seconds: u32, rest_seconds: u32) -> Self {
        Self {
            round_count,
            work_seconds,
            rest_seconds,
            total_duration: None,
        }
    }

    pub fn with_total_duration(mut self, total_duration: u32) -> Self {
        self.total_duration = Some(total_duration);
        self
    }

    pub fn round_duration(&self) -> u32 {
        self.work_seconds + self.rest_seconds
    }

    /// Seconds the countdown starts from
    pub fn total_duration(&self) -> u32 {
        self.total_duration
            .unwrap_or_else(|| self.round_count.saturating_mul(self.round_duration()))
    }

    /// A plan without a rest sub-phase never toggles `is_resting`
    pub fn has_rest(&self) -> bool {
        self.rest_seconds > 0
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.round_count == 0 {
            return Err(ConfigError::InvalidRoundCount(0));
        }
        if self.work_seconds == 0 {
            return Err(ConfigError::InvalidWorkSeconds(0));
        }
        if self.work_seconds.checked_add(self.rest_seconds).is_none() {
            return Err(ConfigError::OutOfRange {
                field: "round duration",
                value: i64::from(self.work_seconds) + i64::from(self.rest_seconds),
            });
        }
        if self.total_duration.is_none()
            && self.round_count.checked_mul(self.round_duration()).is_none()
        {
            return Err(ConfigError::OutOfRange {
                field: "total duration",
                value: i64::from(self.round_count) * i64::from(self.round_duration()),
            });
        }
        Ok(())
    }
}

/// Immutable configuration for one timer session.
///
/// Each mode carries only the fields it uses, so a work interval on a
/// countdown cannot be expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode")]
pub enum TimerConfiguration {
    Countdown {
        total_duration: u32,
    },
    Stopwatch,
    #[serde(rename = "AMRAP")]
    Amrap {
        total_duration: u32,
        /// Display value only; the engine never advances rounds for AMRAP
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target_rounds: Option<u32>,
    },
    #[serde(rename = "EMOM")]
    Emom(IntervalPlan),
    Tabata(IntervalPlan),
}

impl TimerConfiguration {
    pub fn countdown(total_duration: u32) -> Self {
        TimerConfiguration::Countdown { total_duration }
    }

    pub fn stopwatch() -> Self {
        TimerConfiguration::Stopwatch
    }

    pub fn amrap(total_duration: u32) -> Self {
        TimerConfiguration::Amrap {
            total_duration,
            target_rounds: None,
        }
    }

    pub fn emom(plan: IntervalPlan) -> Result<Self, ConfigError> {
        plan.validate()?;
        Ok(TimerConfiguration::Emom(plan))
    }

    pub fn tabata(plan: IntervalPlan) -> Result<Self, ConfigError> {
        plan.validate()?;
        Ok(TimerConfiguration::Tabata(plan))
    }

    /// Build a configuration from raw settings-form input, applying the
    /// per-mode defaults
    pub fn from_settings(settings: &TimerSettings) -> Result<Self, ConfigError> {
        match settings.mode {
            TimerMode::Stopwatch => Ok(TimerConfiguration::Stopwatch),
            TimerMode::Countdown => Ok(TimerConfiguration::Countdown {
                total_duration: required_duration(settings)?,
            }),
            TimerMode::Amrap => Ok(TimerConfiguration::Amrap {
                total_duration: required_duration(settings)?,
                target_rounds: settings
                    .rounds
                    .map(|rounds| positive("rounds", rounds, ConfigError::InvalidRoundCount))
                    .transpose()?,
            }),
            TimerMode::Emom => {
                let plan = interval_plan(settings, EMOM_ROUNDS, EMOM_WORK_SECONDS, EMOM_REST_SECONDS)?;
                Self::emom(plan)
            }
            TimerMode::Tabata => {
                let plan = interval_plan(
                    settings,
                    TABATA_ROUNDS,
                    TABATA_WORK_SECONDS,
                    TABATA_REST_SECONDS,
                )?;
                Self::tabata(plan)
            }
        }
    }

    /// Re-check invariants on a configuration that did not come through a
    /// validating constructor (e.g. deserialized)
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            TimerConfiguration::Emom(plan) | TimerConfiguration::Tabata(plan) => plan.validate(),
            _ => Ok(()),
        }
    }

    pub fn mode(&self) -> TimerMode {
        match self {
            TimerConfiguration::Countdown { .. } => TimerMode::Countdown,
            TimerConfiguration::Stopwatch => TimerMode::Stopwatch,
            TimerConfiguration::Amrap { .. } => TimerMode::Amrap,
            TimerConfiguration::Emom(_) => TimerMode::Emom,
            TimerConfiguration::Tabata(_) => TimerMode::Tabata,
        }
    }

    /// Value `elapsed_or_remaining` starts from (and returns to on reset)
    pub fn initial_value(&self) -> u32 {
        match self {
            TimerConfiguration::Stopwatch => 0,
            TimerConfiguration::Countdown { total_duration }
            | TimerConfiguration::Amrap { total_duration, .. } => *total_duration,
            TimerConfiguration::Emom(plan) | TimerConfiguration::Tabata(plan) => {
                plan.total_duration()
            }
        }
    }

    /// Total duration for modes that count down; `None` for the stopwatch
    pub fn total_duration(&self) -> Option<u32> {
        match self {
            TimerConfiguration::Stopwatch => None,
            other => Some(other.initial_value()),
        }
    }

    pub fn interval_plan(&self) -> Option<&IntervalPlan> {
        match self {
            TimerConfiguration::Emom(plan) | TimerConfiguration::Tabata(plan) => Some(plan),
            _ => None,
        }
    }
}

/// Raw, unvalidated timer settings as entered in a settings form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSettings {
    pub mode: TimerMode,
    #[serde(default)]
    pub duration: Option<i64>,
    #[serde(default)]
    pub rounds: Option<i64>,
    #[serde(default)]
    pub work_seconds: Option<i64>,
    #[serde(default)]
    pub rest_seconds: Option<i64>,
}

impl TimerSettings {
    pub fn new(mode: TimerMode) -> Self {
        Self {
            mode,
            duration: None,
            rounds: None,
            work_seconds: None,
            rest_seconds: None,
        }
    }

    pub fn duration(mut self, seconds: i64) -> Self {
        self.duration = Some(seconds);
        self
    }

    pub fn rounds(mut self, rounds: i64) -> Self {
        self.rounds = Some(rounds);
        self
    }

    pub fn work_rest(mut self, work_seconds: i64, rest_seconds: i64) -> Self {
        self.work_seconds = Some(work_seconds);
        self.rest_seconds = Some(rest_seconds);
        self
    }
}

fn required_duration(settings: &TimerSettings) -> Result<u32, ConfigError> {
    let duration = settings.duration.ok_or(ConfigError::MissingDuration {
        mode: settings.mode,
    })?;
    non_negative_duration(duration)
}

fn non_negative_duration(value: i64) -> Result<u32, ConfigError> {
    if value < 0 {
        return Err(ConfigError::NegativeDuration(value));
    }
    u32::try_from(value).map_err(|_| ConfigError::OutOfRange {
        field: "duration",
        value,
    })
}

fn positive(
    field: &'static str,
    value: i64,
    invalid: fn(i64) -> ConfigError,
) -> Result<u32, ConfigError> {
    if value <= 0 {
        return Err(invalid(value));
    }
    u32::try_from(value).map_err(|_| ConfigError::OutOfRange { field, value })
}

fn interval_plan(
    settings: &TimerSettings,
    default_rounds: u32,
    default_work: u32,
    default_rest: u32,
) -> Result<IntervalPlan, ConfigError> {
    let round_count = match settings.rounds {
        Some(rounds) => positive("rounds", rounds, ConfigError::InvalidRoundCount)?,
        None => default_rounds,
    };
    let work_seconds = match settings.work_seconds {
        Some(work) => positive("work_seconds", work, ConfigError::InvalidWorkSeconds)?,
        None => default_work,
    };
    let rest_seconds = match settings.rest_seconds {
        Some(rest) if rest < 0 => return Err(ConfigError::NegativeRestSeconds(rest)),
        Some(rest) => u32::try_from(rest).map_err(|_| ConfigError::OutOfRange {
            field: "rest_seconds",
            value: rest,
        })?,
        None => default_rest,
    };

    let mut plan = IntervalPlan::new(round_count, work_seconds, rest_seconds);
    if let Some(duration) = settings.duration {
        plan = plan.with_total_duration(non_negative_duration(duration)?);
    }
    Ok(plan)
}
