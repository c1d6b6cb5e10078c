//! Phase-transition notifier
//!
//! Fans engine events out to audio/visual listeners over a broadcast channel.
//! Every event of a tick is published, in the order the engine produced it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::debug;

use crate::{state::TimerState, timer::TimerEvent, utils::format_clock};

const DEFAULT_CAPACITY: usize = 100;

/// Side effect a listener should produce for a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cue {
    /// Audible beep on work/rest and round changes
    Beep,
    /// Ask the athlete to log results
    ResultsPrompt,
}

impl Cue {
    pub fn for_event(event: &TimerEvent) -> Self {
        match event {
            TimerEvent::PhaseChanged { .. } | TimerEvent::RoundAdvanced { .. } => Cue::Beep,
            TimerEvent::Completed => Cue::ResultsPrompt,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerNotification {
    pub event: TimerEvent,
    pub cue: Cue,
    pub round: u32,
    pub clock: String,
    pub timestamp: DateTime<Utc>,
}

impl TimerNotification {
    pub fn new(event: TimerEvent, state: &TimerState) -> Self {
        Self {
            event,
            cue: Cue::for_event(&event),
            round: state.current_round,
            clock: format_clock(state.elapsed_or_remaining),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notifier {
    tx: broadcast::Sender<TimerNotification>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TimerNotification> {
        self.tx.subscribe()
    }

    /// Publish one notification per event; returns how many were published
    pub fn publish(&self, events: &[TimerEvent], state: &TimerState) -> usize {
        for event in events {
            let notification = TimerNotification::new(*event, state);
            debug!("Timer notification: {:?} ({:?})", notification.event, notification.cue);

            // No subscribers is fine; the cue player may not be running
            if let Err(e) = self.tx.send(notification) {
                debug!("No listeners for timer notification: {}", e);
            }
        }
        events.len()
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::{Phase, TimerConfiguration};

    #[tokio::test]
    async fn publishes_every_event_in_order() {
        let notifier = Notifier::new();
        let mut rx = notifier.subscribe();
        let mut state = TimerState::initial(&TimerConfiguration::countdown(60));
        state.current_round = 3;

        let events = [
            TimerEvent::PhaseChanged { phase: Phase::Work },
            TimerEvent::RoundAdvanced { round: 3 },
        ];
        assert_eq!(notifier.publish(&events, &state), 2);

        let first = rx.recv().await.expect("first notification");
        let second = rx.recv().await.expect("second notification");
        assert_eq!(first.event, events[0]);
        assert_eq!(second.event, events[1]);
        assert_eq!(first.cue, Cue::Beep);
        assert_eq!(second.round, 3);
        assert_eq!(second.clock, "01:00");
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn duplicate_events_are_not_coalesced() {
        let notifier = Notifier::new();
        let mut rx = notifier.subscribe();
        let state = TimerState::initial(&TimerConfiguration::stopwatch());

        let events = [TimerEvent::Completed, TimerEvent::Completed];
        notifier.publish(&events, &state);

        assert_eq!(rx.recv().await.unwrap().cue, Cue::ResultsPrompt);
        assert_eq!(rx.recv().await.unwrap().cue, Cue::ResultsPrompt);
    }

    #[test]
    fn publishing_without_listeners_is_harmless() {
        let notifier = Notifier::new();
        let state = TimerState::initial(&TimerConfiguration::stopwatch());
        assert_eq!(notifier.publish(&[TimerEvent::Completed], &state), 1);
    }
}
