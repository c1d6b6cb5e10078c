//! In-memory workout diary receiving recorded sessions

use tracing::info;
use uuid::Uuid;

use super::recorder::WorkoutLogRecord;

#[derive(Debug, Default)]
pub struct WorkoutDiary {
    logs: Vec<WorkoutLogRecord>,
}

impl WorkoutDiary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, record: WorkoutLogRecord) {
        info!("Diary entry {} added for workout {}", record.id, record.workout_id);
        self.logs.push(record);
    }

    pub fn list(&self) -> &[WorkoutLogRecord] {
        &self.logs
    }

    pub fn get(&self, id: Uuid) -> Option<&WorkoutLogRecord> {
        self.logs.iter().find(|log| log.id == id)
    }

    pub fn for_workout<'a>(
        &'a self,
        workout_id: &'a str,
    ) -> impl Iterator<Item = &'a WorkoutLogRecord> + 'a {
        self.logs.iter().filter(move |log| log.workout_id == workout_id)
    }

    pub fn len(&self) -> usize {
        self.logs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.logs.is_empty()
    }
}
