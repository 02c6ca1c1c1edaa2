// ABOUTME: Integration tests for session playback and stats aggregation
// ABOUTME: Generates a fallback routine, plays it under a manual clock, folds the report
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stretchease

//! Session Flow Tests
//!
//! Full pass from generated routine to completion report to the stats
//! aggregate, with time controlled by a manual clock.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use chrono::NaiveDate;
use std::sync::Arc;
use stretchease::generator::RoutineGenerator;
use stretchease::models::{Difficulty, Preferences};
use stretchease::session::{LoggingEffects, ManualClock, SessionPlayer, SessionState};
use stretchease::stats::SessionStats;

fn preferences() -> Preferences {
    Preferences {
        duration: 120,
        goals: vec!["stress_relief".to_owned()],
        body_parts: vec!["neck".to_owned()],
        equipment: vec!["none".to_owned()],
        difficulty: Difficulty::Beginner,
        energy_level: None,
        time_of_day: None,
        problems: Vec::new(),
    }
}

async fn fallback_routine() -> stretchease::models::Routine {
    RoutineGenerator::empty()
        .with_seed(13)
        .generate(&preferences())
        .await
        .unwrap()
}

#[tokio::test]
async fn test_generated_routine_plays_to_completion() {
    let routine = fallback_routine().await;
    let exercise_count = routine.exercises.len();
    let durations: Vec<u32> = routine.exercises.iter().map(|e| e.duration).collect();

    let clock = Arc::new(ManualClock::new());
    let mut player = SessionPlayer::new(
        routine,
        Arc::<ManualClock>::clone(&clock),
        Arc::new(LoggingEffects),
    )
    .unwrap();

    let mut report = None;
    for duration in durations {
        player.start();
        // Walk wall-clock time past the countdown in tick-sized steps
        for _ in 0..=(duration * 10) {
            clock.advance_ms(100);
            if let Some(r) = player.tick() {
                report = Some(r);
            }
        }
    }

    let report = report.expect("last countdown expiry emits the report");
    assert_eq!(player.state(), SessionState::Completed);
    assert_eq!(report.completed_exercises, exercise_count);
    assert_eq!(report.skipped_exercises, 0);
}

#[tokio::test]
async fn test_report_feeds_stats_streak() {
    let routine = fallback_routine().await;
    let goals = vec!["stress_relief".to_owned()];

    let clock = Arc::new(ManualClock::new());
    let mut player = SessionPlayer::new(
        routine,
        Arc::<ManualClock>::clone(&clock),
        Arc::new(LoggingEffects),
    )
    .unwrap();

    player.start();
    clock.advance_ms(90_000);
    let mut report = None;
    while report.is_none() && player.state() != SessionState::Completed {
        report = player.advance();
        player.start();
    }
    let report = report.unwrap();
    assert_eq!(report.total_time, 90);

    let mut stats = SessionStats::new();
    let day1 = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    let day2 = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
    stats.record(&report, &goals, day1);
    stats.record(&report, &goals, day2);

    assert_eq!(stats.total_sessions, 2);
    assert_eq!(stats.total_time_spent, 180);
    assert_eq!(stats.streak_days, 2);
    assert_eq!(stats.top_goal(), Some("stress_relief"));
    assert_eq!(stats.completed_routines.len(), 2);
}
