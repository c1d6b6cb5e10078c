//! Timer state structure and management

use serde::{Deserialize, Serialize};

use crate::timer::{Phase, TimerConfiguration};

/// Mutable per-session timer values, advanced once per tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    /// Counts up for the stopwatch, down for every other mode
    pub elapsed_or_remaining: u32,
    pub current_round: u32,
    /// Only ever true during the rest sub-phase of EMOM/Tabata
    pub is_resting: bool,
    pub is_running: bool,
    pub is_completed: bool,
}

impl TimerState {
    /// Create a fresh, stopped state for the given configuration
    pub fn initial(config: &TimerConfiguration) -> Self {
        Self {
            elapsed_or_remaining: config.initial_value(),
            current_round: 1,
            is_resting: false,
            is_running: false,
            is_completed: false,
        }
    }

    /// Return to the configuration's initial values, whatever state we are in
    pub fn reset(&mut self, config: &TimerConfiguration) {
        *self = Self::initial(config);
    }

    /// Current sub-phase; always `Work` outside EMOM/Tabata
    pub fn phase(&self) -> Phase {
        if self.is_resting {
            Phase::Rest
        } else {
            Phase::Work
        }
    }

    /// Mark the state terminal: clamp to zero and stop
    pub(crate) fn complete(&mut self) {
        self.elapsed_or_remaining = 0;
        self.is_running = false;
        self.is_completed = true;
    }

    /// Headline shown above the clock
    pub fn label(&self, config: &TimerConfiguration, workout_name: Option<&str>) -> String {
        if self.is_completed {
            return "Completed!".to_string();
        }
        if self.is_resting {
            return "REST".to_string();
        }
        match config {
            TimerConfiguration::Amrap { .. } => "AMRAP".to_string(),
            TimerConfiguration::Emom(_) | TimerConfiguration::Tabata(_) => "WORK".to_string(),
            _ => workout_name.unwrap_or("Timer").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::IntervalPlan;

    #[test]
    fn reset_restores_initial_values_from_any_state() {
        let config = TimerConfiguration::countdown(1200);
        let mut state = TimerState {
            elapsed_or_remaining: 0,
            current_round: 4,
            is_resting: true,
            is_running: false,
            is_completed: true,
        };

        state.reset(&config);
        assert_eq!(state, TimerState::initial(&config));
        assert_eq!(state.elapsed_or_remaining, 1200);
        assert_eq!(state.current_round, 1);
        assert!(!state.is_resting);
        assert!(!state.is_completed);
    }

    #[test]
    fn stopwatch_starts_from_zero() {
        let state = TimerState::initial(&TimerConfiguration::stopwatch());
        assert_eq!(state.elapsed_or_remaining, 0);
    }

    #[test]
    fn labels_follow_phase_and_mode() {
        let tabata = TimerConfiguration::tabata(IntervalPlan::new(8, 20, 10)).unwrap();
        let mut state = TimerState::initial(&tabata);
        assert_eq!(state.label(&tabata, None), "WORK");

        state.is_resting = true;
        assert_eq!(state.label(&tabata, None), "REST");

        state.complete();
        assert_eq!(state.label(&tabata, None), "Completed!");

        let countdown = TimerConfiguration::countdown(60);
        let state = TimerState::initial(&countdown);
        assert_eq!(state.label(&countdown, Some("Fran")), "Fran");
        assert_eq!(state.label(&countdown, None), "Timer");
        assert_eq!(
            state.label(&TimerConfiguration::amrap(60), Some("Cindy")),
            "AMRAP"
        );
    }
}
