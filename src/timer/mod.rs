//! Interval timer core
//!
//! Configuration types, the tick-by-tick engine and the events it emits.
//! Nothing in here knows about real time; see `tasks::clock_driver` for that.

pub mod configuration;
pub mod engine;
pub mod events;

pub use configuration::{ConfigError, IntervalPlan, TimerConfiguration, TimerMode, TimerSettings};
pub use engine::advance;
pub use events::{Phase, TimerEvent};
