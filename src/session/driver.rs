// ABOUTME: Headless tick driver - pumps the player on a periodic interval
// ABOUTME: Auto-starts each exercise so a whole routine plays unattended
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stretchease

use std::time::Duration;

use tokio::time::{interval, MissedTickBehavior};
use tracing::debug;

use super::{SessionPlayer, SessionState};
use crate::constants::limits::TICK_PERIOD_MS;
use crate::models::CompletionReport;

/// Play a session to completion without user interaction.
///
/// Wakes the player every 100ms and presses start whenever an exercise
/// change has stopped the timer. The countdown itself is computed from
/// wall-clock deltas inside the player, so missed ticks only delay cue
/// delivery, never the accounting.
pub async fn run_to_completion(player: &mut SessionPlayer) -> CompletionReport {
    let mut ticker = interval(Duration::from_millis(TICK_PERIOD_MS));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;

        if player.state() == SessionState::Idle {
            debug!(
                exercise = %player.current_exercise().name,
                seconds = player.current_exercise().duration,
                "Starting exercise"
            );
            player.start();
        }

        if let Some(report) = player.tick() {
            return report;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Difficulty, Exercise, ExerciseKind, Routine, RoutineSource};
    use crate::session::{LoggingEffects, ManualClock};
    use std::sync::Arc;

    fn short_routine() -> Routine {
        let exercises = vec![
            Exercise {
                name: "One".to_owned(),
                duration: 1,
                description: String::new(),
                kind: ExerciseKind::Static,
                target_muscles: Vec::new(),
                difficulty: Difficulty::default(),
                equipment: Vec::new(),
                benefits: Vec::new(),
                tips: None,
                video_search_query: None,
                video: None,
            },
            Exercise {
                name: "Two".to_owned(),
                duration: 1,
                description: String::new(),
                kind: ExerciseKind::Static,
                target_muscles: Vec::new(),
                difficulty: Difficulty::default(),
                equipment: Vec::new(),
                benefits: Vec::new(),
                tips: None,
                video_search_query: None,
                video: None,
            },
        ];
        Routine {
            name: "Short".to_owned(),
            total_duration: 2,
            difficulty: Difficulty::Beginner,
            benefits: Vec::new(),
            tips: Vec::new(),
            cooldown_advice: String::new(),
            is_fallback: true,
            source: RoutineSource::Fallback,
            exercises,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_driver_plays_whole_routine() {
        let clock = Arc::new(ManualClock::new());
        let manual = Arc::<ManualClock>::clone(&clock);
        let mut player =
            SessionPlayer::new(short_routine(), clock, Arc::new(LoggingEffects)).unwrap();

        let driver = async {
            run_to_completion(&mut player).await
        };
        // Tokio's paused clock auto-advances through the interval waits, but
        // the player reads the manual clock; push it forward from a side task.
        let pump = async {
            loop {
                tokio::time::sleep(Duration::from_millis(TICK_PERIOD_MS)).await;
                manual.advance_ms(TICK_PERIOD_MS);
            }
        };

        let report = tokio::select! {
            report = driver => report,
            () = pump => unreachable!(),
        };

        assert_eq!(report.completed_exercises, 2);
        assert_eq!(report.skipped_exercises, 0);
    }
}
