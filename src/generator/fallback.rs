// ABOUTME: Rule-based routine synthesizer used when every generative provider fails
// ABOUTME: Filters the fixed catalog, fills the target duration, and derives name/tips/benefits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stretchease

//! # Fallback Routine Synthesizer
//!
//! Builds a routine from the fixed catalog with no network access. Selection
//! is random for variety but takes the RNG as a parameter, so callers that
//! need reproducibility (tests, replays) can pass a seeded generator.
//!
//! Filtering broadens in stages so the synthesizer is total: tag match first,
//! then equipment-only, then the whole catalog, and finally a hardcoded safe
//! exercise if nothing else fit the budget.

use std::collections::HashSet;

use rand::Rng;
use tracing::debug;

use super::catalog::{CatalogEntry, CATALOG, SAFE_EXERCISE};
use crate::constants::goals;
use crate::constants::limits::{DURATION_SLACK_SECONDS, MAX_BENEFITS, MAX_TIPS};
use crate::models::{Difficulty, Exercise, Preferences, Routine, RoutineSource, TimeOfDay};

/// Closing advice attached to every fallback routine
const COOLDOWN_ADVICE: &str = "Take deep breaths and move gently back to normal activity.";

/// Synthesize a routine from the catalog for the given preferences.
///
/// Never fails and never returns an empty exercise list.
pub fn synthesize(preferences: &Preferences, rng: &mut impl Rng) -> Routine {
    let target = if preferences.duration == 0 {
        300
    } else {
        preferences.duration
    };

    let candidates = filter_catalog(preferences);
    debug!(
        candidates = candidates.len(),
        target_seconds = target,
        "Synthesizing fallback routine"
    );

    let (mut exercises, mut total) = select_exercises(&candidates, target, rng);

    if exercises.is_empty() {
        exercises.push(SAFE_EXERCISE.to_exercise());
        total = SAFE_EXERCISE.duration;
    }

    Routine {
        name: routine_name(&preferences.goals),
        total_duration: total,
        difficulty: preferences.difficulty,
        benefits: aggregate_benefits(&exercises),
        tips: build_tips(preferences),
        cooldown_advice: COOLDOWN_ADVICE.to_owned(),
        is_fallback: true,
        source: RoutineSource::Fallback,
        exercises,
    }
}

/// Filter with staged broadening so the result is empty only for an empty catalog
fn filter_catalog(preferences: &Preferences) -> Vec<&'static CatalogEntry> {
    let tag_matched: Vec<&CatalogEntry> = CATALOG
        .iter()
        .filter(|e| {
            (e.matches_goals(&preferences.goals) || e.matches_body_parts(&preferences.body_parts))
                && e.matches_equipment(&preferences.equipment)
        })
        .collect();
    if !tag_matched.is_empty() {
        return tag_matched;
    }

    let equipment_matched: Vec<&CatalogEntry> = CATALOG
        .iter()
        .filter(|e| e.matches_equipment(&preferences.equipment))
        .collect();
    if !equipment_matched.is_empty() {
        return equipment_matched;
    }

    CATALOG.iter().collect()
}

/// Greedy random selection toward the target duration.
///
/// Repetition is avoided until every candidate has been used once, then the
/// used-set is cleared and selection cycles. Bounded because each pass either
/// adds an exercise or breaks.
fn select_exercises(
    candidates: &[&'static CatalogEntry],
    target: u32,
    rng: &mut impl Rng,
) -> (Vec<Exercise>, u32) {
    let mut selected = Vec::new();
    let mut total = 0u32;
    let mut used: HashSet<&str> = HashSet::new();

    while total < target {
        let available: Vec<&CatalogEntry> = candidates
            .iter()
            .filter(|e| !used.contains(e.name))
            .copied()
            .collect();

        if available.is_empty() {
            if used.is_empty() {
                break;
            }
            used.clear();
            continue;
        }

        let pick = available[rng.gen_range(0..available.len())];

        if total + pick.duration <= target + DURATION_SLACK_SECONDS {
            total += pick.duration;
            used.insert(pick.name);
            selected.push(pick.to_exercise());
        } else if let Some(shorter) = available.iter().find(|e| total + e.duration <= target) {
            total += shorter.duration;
            used.insert(shorter.name);
            selected.push(shorter.to_exercise());
        } else {
            break;
        }
    }

    (selected, total)
}

/// Routine name keyed by the primary goal tag
fn routine_name(goals: &[String]) -> String {
    let name = match goals.first().map(String::as_str) {
        Some(goals::MORNING_WAKE_UP) => "Morning Energizer",
        Some(goals::PRE_WORKOUT) => "Pre-Workout Prep",
        Some(goals::POST_WORKOUT) => "Post-Workout Recovery",
        Some(goals::DESK_BREAK) => "Desk Break Relief",
        Some(goals::STRESS_RELIEF) => "Stress Relief Flow",
        Some(goals::BEDTIME_RELAX) => "Bedtime Wind Down",
        Some(goals::PAIN_RELIEF) => "Pain Relief Routine",
        Some(goals::FLEXIBILITY) => "Flexibility Flow",
        _ => "Custom Stretch Routine",
    };
    name.to_owned()
}

/// Tips from a small rule table, capped at five with two generic closers
fn build_tips(preferences: &Preferences) -> Vec<String> {
    let mut tips = Vec::new();

    if preferences.time_of_day == Some(TimeOfDay::Morning) {
        tips.push("Start gently - your body may be stiff from sleep".to_owned());
    }
    if preferences.goals.iter().any(|g| g == goals::PRE_WORKOUT) {
        tips.push("Focus on dynamic movements to warm up muscles".to_owned());
    }
    if preferences.goals.iter().any(|g| g == goals::POST_WORKOUT) {
        tips.push("Hold stretches longer for better recovery".to_owned());
    }
    if preferences.difficulty == Difficulty::Beginner {
        tips.push("Listen to your body and don't push too hard".to_owned());
    }

    tips.push("Breathe deeply throughout each stretch".to_owned());
    tips.push("Move slowly and with control".to_owned());

    tips.truncate(MAX_TIPS);
    tips
}

/// Union of exercise-level benefits, defaulting to four generic strings
fn aggregate_benefits(exercises: &[Exercise]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut benefits = Vec::new();
    for ex in exercises {
        for b in &ex.benefits {
            if seen.insert(b.clone()) {
                benefits.push(b.clone());
            }
        }
    }

    if benefits.is_empty() {
        benefits = vec![
            "Improved flexibility".to_owned(),
            "Reduced muscle tension".to_owned(),
            "Better posture".to_owned(),
            "Increased blood flow".to_owned(),
        ];
    }

    benefits.truncate(MAX_BENEFITS);
    benefits
}
