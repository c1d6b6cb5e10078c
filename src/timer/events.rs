//! Transition events produced by the timer engine

use std::fmt;

use serde::{Deserialize, Serialize};

/// Work or rest sub-state of an EMOM/Tabata round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Work,
    Rest,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Work => f.write_str("work"),
            Phase::Rest => f.write_str("rest"),
        }
    }
}

/// A transition detected while applying one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum TimerEvent {
    PhaseChanged { phase: Phase },
    RoundAdvanced { round: u32 },
    Completed,
}
