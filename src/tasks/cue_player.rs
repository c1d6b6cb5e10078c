//! Cue player background task

use std::io::Write;

use tokio::sync::broadcast::{error::RecvError, Receiver};
use tracing::{info, warn};

use crate::services::notifier::{Cue, TimerNotification};
use crate::timer::TimerEvent;

/// Background task that turns timer notifications into cues.
///
/// Runs until the notification channel closes and returns how many
/// notifications it handled.
pub async fn cue_player_task(mut notifications: Receiver<TimerNotification>, bell: bool) -> u64 {
    info!("Starting cue player task (bell {})", if bell { "on" } else { "off" });

    let mut played = 0;
    loop {
        match notifications.recv().await {
            Ok(notification) => {
                play_cue(&notification, bell);
                played += 1;
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!("Cue player lagged behind, {} notifications skipped", skipped);
            }
            Err(RecvError::Closed) => {
                info!("Notification channel closed, stopping cue player");
                break;
            }
        }
    }
    played
}

fn play_cue(notification: &TimerNotification, bell: bool) {
    match (notification.cue, notification.event) {
        (Cue::Beep, TimerEvent::PhaseChanged { phase }) => {
            info!("[{}] {} phase", notification.clock, phase.to_string().to_uppercase());
        }
        (Cue::Beep, TimerEvent::RoundAdvanced { round }) => {
            info!("[{}] Round {}", notification.clock, round);
        }
        (Cue::ResultsPrompt, _) | (_, TimerEvent::Completed) => {
            info!(
                "[{}] Workout complete after round {}; log it with POST /timer/finish",
                notification.clock, notification.round
            );
        }
    }

    if bell && notification.cue == Cue::Beep {
        ring_bell();
    }
}

fn ring_bell() {
    let mut stdout = std::io::stdout();
    if let Err(e) = stdout.write_all(b"\x07").and_then(|_| stdout.flush()) {
        warn!("Failed to ring terminal bell: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        services::notifier::Notifier,
        state::TimerState,
        timer::{Phase, TimerConfiguration},
    };

    #[tokio::test]
    async fn plays_until_channel_closes() {
        let notifier = Notifier::new();
        let task = tokio::spawn(cue_player_task(notifier.subscribe(), false));

        let state = TimerState::initial(&TimerConfiguration::countdown(30));
        notifier.publish(
            &[
                TimerEvent::PhaseChanged { phase: Phase::Rest },
                TimerEvent::RoundAdvanced { round: 2 },
                TimerEvent::Completed,
            ],
            &state,
        );
        drop(notifier);

        assert_eq!(task.await.expect("cue player"), 3);
    }
}
