//! Tick-by-tick timer engine
//!
//! `advance` is a pure function of the previous state and the configuration.
//! It is called once per clock tick and returns the next state together with
//! every transition detected on that tick, in the order they happened.

use crate::state::TimerState;

use super::{IntervalPlan, Phase, TimerConfiguration, TimerEvent};

/// Apply one tick.
///
/// A stopped or completed state is returned unchanged with no events; the
/// clock driver is not supposed to tick such a session.
pub fn advance(state: &TimerState, config: &TimerConfiguration) -> (TimerState, Vec<TimerEvent>) {
    let mut next = state.clone();
    let mut events = Vec::new();

    if !state.is_running || state.is_completed {
        return (next, events);
    }

    match config {
        TimerConfiguration::Stopwatch => {
            next.elapsed_or_remaining = next.elapsed_or_remaining.saturating_add(1);
        }
        // AMRAP rounds are a display value, never engine state
        TimerConfiguration::Countdown { .. } | TimerConfiguration::Amrap { .. } => {
            count_down(&mut next, &mut events);
        }
        TimerConfiguration::Emom(plan) | TimerConfiguration::Tabata(plan) => {
            interval_tick(&mut next, plan, &mut events);
        }
    }

    (next, events)
}

fn count_down(next: &mut TimerState, events: &mut Vec<TimerEvent>) {
    next.elapsed_or_remaining = next.elapsed_or_remaining.saturating_sub(1);
    if next.elapsed_or_remaining == 0 {
        complete(next, events);
    }
}

fn interval_tick(next: &mut TimerState, plan: &IntervalPlan, events: &mut Vec<TimerEvent>) {
    next.elapsed_or_remaining = next.elapsed_or_remaining.saturating_sub(1);

    let round_duration = plan.round_duration();
    let time_into_round = round_duration - next.elapsed_or_remaining % round_duration;

    // Rest boundary first, then round boundary; at most one fires per tick.
    if plan.has_rest() && time_into_round == plan.work_seconds {
        next.is_resting = true;
        events.push(TimerEvent::PhaseChanged { phase: Phase::Rest });
    } else if time_into_round == round_duration {
        if next.current_round >= plan.round_count {
            complete(next, events);
            return;
        }
        next.current_round += 1;
        next.is_resting = false;
        events.push(TimerEvent::PhaseChanged { phase: Phase::Work });
        events.push(TimerEvent::RoundAdvanced {
            round: next.current_round,
        });
    }

    if next.elapsed_or_remaining == 0 {
        complete(next, events);
    }
}

fn complete(next: &mut TimerState, events: &mut Vec<TimerEvent>) {
    next.complete();
    events.push(TimerEvent::Completed);
}
