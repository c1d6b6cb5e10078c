//! Session recording: turn a finished timer session into a workout log

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::{state::TimerState, timer::TimerConfiguration};

pub const MIN_FEELING: u8 = 1;
pub const MAX_FEELING: u8 = 10;
pub const DEFAULT_FEELING: u8 = 7;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("feeling must be between 1 and 10 (got {0})")]
    FeelingOutOfRange(u8),
}

/// Per-exercise result; capturing these is left to the diary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseResult {
    pub id: Uuid,
    pub exercise_id: String,
    pub reps: Option<u32>,
    pub weight: Option<f64>,
    pub distance: Option<f64>,
    pub duration: Option<u32>,
    pub notes: Option<String>,
}

/// Diary entry produced once at the end of a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutLogRecord {
    pub id: Uuid,
    pub workout_id: String,
    pub date: DateTime<Utc>,
    /// Seconds actually spent, regardless of the display direction
    pub duration_seconds: u32,
    pub notes: Option<String>,
    pub feeling: u8,
    pub exercise_results: Vec<ExerciseResult>,
}

/// Seconds spent in a session: the stopwatch count, or the distance travelled
/// from the configured total for modes that count down
pub fn session_duration(config: &TimerConfiguration, state: &TimerState) -> u32 {
    match config.total_duration() {
        None => state.elapsed_or_remaining,
        Some(total) => total.saturating_sub(state.elapsed_or_remaining),
    }
}

/// Package a finished (or manually stopped) session as a log record
pub fn finalize(
    config: &TimerConfiguration,
    state: &TimerState,
    workout_id: &str,
    notes: Option<String>,
    feeling: u8,
) -> Result<WorkoutLogRecord, RecordError> {
    if !(MIN_FEELING..=MAX_FEELING).contains(&feeling) {
        return Err(RecordError::FeelingOutOfRange(feeling));
    }

    let record = WorkoutLogRecord {
        id: Uuid::new_v4(),
        workout_id: workout_id.to_string(),
        date: Utc::now(),
        duration_seconds: session_duration(config, state),
        notes: notes.filter(|n| !n.trim().is_empty()),
        feeling,
        exercise_results: Vec::new(),
    };

    info!(
        "Recorded {} session for workout {}: {}s, feeling {}",
        config.mode(),
        record.workout_id,
        record.duration_seconds,
        record.feeling
    );
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::IntervalPlan;

    fn countdown_at(remaining: u32) -> (TimerConfiguration, TimerState) {
        let config = TimerConfiguration::countdown(1200);
        let mut state = TimerState::initial(&config);
        state.elapsed_or_remaining = remaining;
        (config, state)
    }

    #[test]
    fn completed_countdown_records_full_duration() {
        let (config, mut state) = countdown_at(1);
        state.complete();
        let record = finalize(&config, &state, "wod2", None, 8).expect("record");
        assert_eq!(record.duration_seconds, 1200);
        assert_eq!(record.workout_id, "wod2");
        assert!(record.exercise_results.is_empty());
    }

    #[test]
    fn stopped_countdown_records_time_spent() {
        let (config, state) = countdown_at(800);
        let record = finalize(&config, &state, "wod2", None, DEFAULT_FEELING).expect("record");
        assert_eq!(record.duration_seconds, 400);
    }

    #[test]
    fn stopwatch_records_accumulated_count() {
        let config = TimerConfiguration::stopwatch();
        let mut state = TimerState::initial(&config);
        state.elapsed_or_remaining = 321;
        assert_eq!(session_duration(&config, &state), 321);
    }

    #[test]
    fn interval_duration_uses_effective_total() {
        let config = TimerConfiguration::emom(IntervalPlan::new(10, 50, 10)).unwrap();
        let mut state = TimerState::initial(&config);
        state.elapsed_or_remaining = 420;
        assert_eq!(session_duration(&config, &state), 180);
    }

    #[test]
    fn feeling_must_be_in_range() {
        let (config, state) = countdown_at(0);
        assert_eq!(
            finalize(&config, &state, "wod1", None, 0).unwrap_err(),
            RecordError::FeelingOutOfRange(0)
        );
        assert_eq!(
            finalize(&config, &state, "wod1", None, 11).unwrap_err(),
            RecordError::FeelingOutOfRange(11)
        );
        assert!(finalize(&config, &state, "wod1", None, 10).is_ok());
    }

    #[test]
    fn blank_notes_are_dropped() {
        let (config, state) = countdown_at(0);
        let record = finalize(&config, &state, "wod1", Some("   ".into()), 5).expect("record");
        assert_eq!(record.notes, None);

        let record =
            finalize(&config, &state, "wod1", Some("PR on thrusters".into()), 5).expect("record");
        assert_eq!(record.notes.as_deref(), Some("PR on thrusters"));
    }
}
