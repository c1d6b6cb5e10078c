//! Timer collaborators
//! 
//! Notification fan-out, session recording and the diary that receives the
//! recorded sessions.

pub mod diary;
pub mod notifier;
pub mod recorder;

// Re-export main types
pub use diary::WorkoutDiary;
pub use notifier::{Cue, Notifier, TimerNotification};
pub use recorder::{finalize, RecordError, WorkoutLogRecord};
