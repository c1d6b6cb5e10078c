//! WOD Timer - interval timer engine for workouts
//! 
//! This library provides the tick-driven timer engine behind Countdown,
//! Stopwatch, AMRAP, EMOM and Tabata sessions, the clock that drives it, the
//! notifications it emits and the recording of finished sessions.

pub mod config;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod timer;
pub mod utils;
pub mod workouts;

// Re-export commonly used types
pub use config::Config;
pub use state::AppState;
pub use api::create_router;
pub use timer::{advance, TimerConfiguration, TimerEvent};
pub use utils::signals::shutdown_signal;
