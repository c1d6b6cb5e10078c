//! Read-only workout catalog the timer can be started from

use super::{Workout, WorkoutType};

#[derive(Debug, Clone, Default)]
pub struct WorkoutCatalog {
    workouts: Vec<Workout>,
}

impl WorkoutCatalog {
    pub fn new(workouts: Vec<Workout>) -> Self {
        Self { workouts }
    }

    /// The benchmark workouts shipped with the app
    pub fn sample() -> Self {
        Self::new(vec![
            Workout {
                id: "wod1".to_string(),
                name: "Cindy".to_string(),
                description: Some("A classic CrossFit benchmark workout.".to_string()),
                kind: WorkoutType::Amrap,
                rounds: Some(20),
                time_cap: None,
            },
            Workout {
                id: "wod2".to_string(),
                name: "Fran".to_string(),
                description: Some("Thrusters and pull-ups - a CrossFit classic.".to_string()),
                kind: WorkoutType::ForTime,
                rounds: None,
                time_cap: None,
            },
            Workout {
                id: "wod3".to_string(),
                name: "Fight Gone Bad".to_string(),
                description: Some(
                    "Three rounds of five exercises for one minute each.".to_string(),
                ),
                kind: WorkoutType::Amrap,
                rounds: Some(3),
                time_cap: None,
            },
        ])
    }

    pub fn list(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn find(&self, id: &str) -> Option<&Workout> {
        self.workouts.iter().find(|workout| workout.id == id)
    }
}
