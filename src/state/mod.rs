//! State management module
//! 
//! This module contains the timer state, the session lifecycle around it and
//! the shared application state.

pub mod app_state;
pub mod session;
pub mod timer_state;

// Re-export main types
pub use app_state::{AppState, StateError};
pub use session::{LinkedWorkout, SessionError, SessionPhase, TickReport, TimerSession, TimerSnapshot};
pub use timer_state::TimerState;
