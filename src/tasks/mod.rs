//! Background tasks module
//! 
//! This module contains the clock driver and the tasks listening to it.

pub mod clock_driver;
pub mod cue_player;

// Re-export main types and functions
pub use clock_driver::ClockDriver;
pub use cue_player::cue_player_task;
