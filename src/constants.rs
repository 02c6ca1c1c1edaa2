// ABOUTME: Application constants - domain tag vocabulary and pipeline defaults
// ABOUTME: Centralizes goal, body part, and equipment tag spellings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stretchease

//! Application constants and the domain tag vocabulary.
//!
//! Goals, body parts and equipment are open string tags at the API surface
//! (providers may invent new ones); the constants here are the tags the
//! fallback catalog and the name/tip rule tables understand.

/// Goal tags understood by the fallback synthesizer
pub mod goals {
    /// Gentle wake-up routine
    pub const MORNING_WAKE_UP: &str = "morning_wake_up";
    /// Dynamic preparation before training
    pub const PRE_WORKOUT: &str = "pre_workout";
    /// Recovery after training
    pub const POST_WORKOUT: &str = "post_workout";
    /// Short break from desk work
    pub const DESK_BREAK: &str = "desk_break";
    /// Relaxation and stress reduction
    pub const STRESS_RELIEF: &str = "stress_relief";
    /// Wind-down before sleep
    pub const BEDTIME_RELAX: &str = "bedtime_relax";
    /// Targeted relief of aches
    pub const PAIN_RELIEF: &str = "pain_relief";
    /// General range-of-motion work
    pub const FLEXIBILITY: &str = "flexibility";
}

/// Body part tags understood by the fallback catalog
pub mod body_parts {
    pub const NECK: &str = "neck";
    pub const SHOULDERS: &str = "shoulders";
    pub const UPPER_BACK: &str = "upper_back";
    pub const LOWER_BACK: &str = "lower_back";
    pub const CHEST: &str = "chest";
    pub const ARMS: &str = "arms";
    pub const HIPS: &str = "hips";
    pub const LEGS: &str = "legs";
    pub const CALVES: &str = "calves";
    pub const FULL_BODY: &str = "full_body";
}

/// Equipment tags; `NONE` always matches availability filters
pub mod equipment {
    pub const NONE: &str = "none";
    pub const MAT: &str = "mat";
    pub const WALL: &str = "wall";
    pub const CHAIR: &str = "chair";
    pub const FOAM_ROLLER: &str = "foam_roller";
    pub const LACROSSE_BALL: &str = "lacrosse_ball";
    pub const RESISTANCE_BAND: &str = "resistance_band";
    pub const YOGA_BLOCK: &str = "yoga_block";
    pub const YOGA_STRAP: &str = "yoga_strap";
}

/// Pipeline defaults and limits
pub mod limits {
    /// Minimum acceptable routine duration in seconds (1 minute floor)
    pub const MIN_ROUTINE_SECONDS: u32 = 60;
    /// Duration assigned to an exercise that arrives without one
    pub const DEFAULT_EXERCISE_SECONDS: u32 = 30;
    /// Slack allowed over the requested duration during fallback selection
    pub const DURATION_SLACK_SECONDS: u32 = 30;
    /// Cap on routine-level benefit strings
    pub const MAX_BENEFITS: usize = 5;
    /// Cap on routine-level tip strings
    pub const MAX_TIPS: usize = 5;
    /// Countdown threshold below which a per-second beep cue fires
    pub const BEEP_WINDOW_SECONDS: u32 = 10;
    /// Tick period for the session timer driver, in milliseconds
    pub const TICK_PERIOD_MS: u64 = 100;
    /// Completed sessions retained in the stats ring
    pub const STATS_HISTORY_LIMIT: usize = 30;
}
