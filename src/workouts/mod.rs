//! Workouts as far as the timer is concerned
//!
//! Only the fields the timer reads are modelled: the workout type and its
//! round/time-cap parameters.

pub mod catalog;

use serde::{Deserialize, Serialize};

use crate::{
    state::LinkedWorkout,
    timer::{
        configuration::{
            EMOM_REST_SECONDS, EMOM_ROUNDS, EMOM_WORK_SECONDS, TABATA_REST_SECONDS,
            TABATA_ROUNDS, TABATA_WORK_SECONDS,
        },
        IntervalPlan, TimerConfiguration,
    },
};

pub use catalog::WorkoutCatalog;

/// For Time workouts without a cap get 20 minutes
pub const DEFAULT_TIME_CAP_SECONDS: u32 = 20 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkoutType {
    #[serde(rename = "AMRAP")]
    Amrap,
    #[serde(rename = "For Time")]
    ForTime,
    #[serde(rename = "EMOM")]
    Emom,
    Tabata,
    Chipper,
    Custom,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workout {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: WorkoutType,
    /// Rounds for EMOM; minutes of the time cap for AMRAP
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rounds: Option<u32>,
    /// Seconds, For Time only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_cap: Option<u32>,
}

impl Workout {
    /// Timer configuration used when this workout is started.
    ///
    /// Zero rounds or a zero time cap count as unset.
    pub fn timer_configuration(&self) -> TimerConfiguration {
        match self.kind {
            WorkoutType::Amrap => {
                TimerConfiguration::amrap(self.rounds.unwrap_or(0).saturating_mul(60))
            }
            WorkoutType::ForTime => TimerConfiguration::countdown(
                self.time_cap
                    .filter(|cap| *cap > 0)
                    .unwrap_or(DEFAULT_TIME_CAP_SECONDS),
            ),
            WorkoutType::Emom => TimerConfiguration::Emom(IntervalPlan::new(
                self.rounds.filter(|rounds| *rounds > 0).unwrap_or(EMOM_ROUNDS),
                EMOM_WORK_SECONDS,
                EMOM_REST_SECONDS,
            )),
            WorkoutType::Tabata => TimerConfiguration::Tabata(IntervalPlan::new(
                TABATA_ROUNDS,
                TABATA_WORK_SECONDS,
                TABATA_REST_SECONDS,
            )),
            WorkoutType::Chipper | WorkoutType::Custom => TimerConfiguration::stopwatch(),
        }
    }

    pub fn link(&self) -> LinkedWorkout {
        LinkedWorkout {
            id: self.id.clone(),
            name: self.name.clone(),
        }
    }
}
