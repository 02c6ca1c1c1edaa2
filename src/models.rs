// ABOUTME: Common data models for routines, exercises, preferences, and reports
// ABOUTME: Canonical shapes consumed by the session player and persistence collaborators
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stretchease

//! # Data Models
//!
//! The canonical routine shape every provider path normalizes into, the
//! user preference bundle that drives generation, and the completion report
//! emitted by the session player.
//!
//! Goals, body parts and equipment are open string tags (providers may use
//! vocabulary beyond the built-in catalog); difficulty, time of day and
//! exercise kind are closed sets.

use serde::{Deserialize, Serialize};

use crate::constants::limits;

/// Difficulty tiers for exercises and routines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// New to stretching
    #[default]
    Beginner,
    /// Comfortable with common movements
    Intermediate,
    /// Experienced, full range of motion
    Advanced,
}

impl Difficulty {
    /// Tag spelling used in prompts and persisted data
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    /// Parse from a tag, falling back to `Beginner`
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_lowercase().as_str() {
            "intermediate" => Self::Intermediate,
            "advanced" => Self::Advanced,
            _ => Self::Beginner,
        }
    }
}

/// Time-of-day context used by the tip rule table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Midday,
    Evening,
}

/// Movement style of an exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseKind {
    /// Held position
    #[default]
    Static,
    /// Controlled repeated movement
    Dynamic,
    /// Anything else (breathing, self-massage)
    Other,
}

/// User preference bundle driving one generation call.
///
/// Immutable once handed to the generator; the orchestrator works on a
/// normalized copy rather than mutating the caller's bundle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    /// Requested routine length in seconds
    pub duration: u32,
    /// Ordered goal tags, primary goal first
    pub goals: Vec<String>,
    /// Body part tags to target
    pub body_parts: Vec<String>,
    /// Available equipment tags; empty means bodyweight only
    #[serde(default)]
    pub equipment: Vec<String>,
    /// Requested difficulty tier
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Free-form energy tag ("low", "wired", ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy_level: Option<String>,
    /// When the session happens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_of_day: Option<TimeOfDay>,
    /// Free-form problem tags ("tight hips", "stiff neck", ...)
    #[serde(default)]
    pub problems: Vec<String>,
}

impl Preferences {
    /// The primary goal tag, if any
    #[must_use]
    pub fn primary_goal(&self) -> Option<&str> {
        self.goals.first().map(String::as_str)
    }
}

/// Reference to an instructional video attached during enrichment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRef {
    /// External video identifier
    pub video_id: String,
    /// Video title as returned by the search
    pub title: String,
}

/// A single timed stretching or mobility movement
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    /// Display name
    pub name: String,
    /// Countdown length in seconds; always positive once normalized
    pub duration: u32,
    /// Instructional text
    pub description: String,
    /// Movement style
    #[serde(default)]
    pub kind: ExerciseKind,
    /// Muscle group / body part tags this movement targets
    #[serde(default)]
    pub target_muscles: Vec<String>,
    /// Difficulty tier
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Required equipment tags; empty means none
    #[serde(default)]
    pub equipment: Vec<String>,
    /// Benefit strings; may be empty, the normalizer supplies defaults
    /// at the routine level
    #[serde(default)]
    pub benefits: Vec<String>,
    /// Form or safety tip
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tips: Option<String>,
    /// Phrase used to look up an instructional video
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_search_query: Option<String>,
    /// Attached video reference; `None` until enrichment succeeds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<VideoRef>,
}

impl Exercise {
    /// Search phrase for video enrichment, defaulting from the name
    #[must_use]
    pub fn search_phrase(&self) -> String {
        self.video_search_query
            .clone()
            .unwrap_or_else(|| format!("{} stretch tutorial", self.name))
    }

    /// Replace a missing or zero duration with the pipeline default.
    /// Every exercise must have a positive duration before scheduling.
    pub fn ensure_duration(&mut self) {
        if self.duration == 0 {
            self.duration = limits::DEFAULT_EXERCISE_SECONDS;
        }
    }
}

/// Which generation path produced a routine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutineSource {
    /// Primary text-completion provider
    StretchGpt,
    /// Secondary chat-completion provider
    OpenRouter,
    /// Rule-based catalog synthesis
    Fallback,
}

impl RoutineSource {
    /// Tag spelling used in logs and persisted data
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StretchGpt => "stretchgpt",
            Self::OpenRouter => "openrouter",
            Self::Fallback => "fallback",
        }
    }
}

/// An ordered sequence of exercises with aggregate metadata.
///
/// Created once per generation request and immutable thereafter except for
/// lazy video attachment on individual exercises.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Routine {
    /// Display name
    pub name: String,
    /// Ordered, non-empty exercise sequence
    pub exercises: Vec<Exercise>,
    /// Sum of exercise durations in seconds
    pub total_duration: u32,
    /// Overall difficulty tier
    pub difficulty: Difficulty,
    /// Deduplicated benefit strings, capped at five
    pub benefits: Vec<String>,
    /// Deduplicated tip strings, capped at five
    pub tips: Vec<String>,
    /// Closing advice shown after the last exercise
    pub cooldown_advice: String,
    /// Provenance flag: true when the rule-based fallback produced this
    pub is_fallback: bool,
    /// Which provider path produced this routine
    pub source: RoutineSource,
}

impl Routine {
    /// Recompute `total_duration` from the exercise list
    #[must_use]
    pub fn summed_duration(&self) -> u32 {
        self.exercises.iter().map(|e| e.duration).sum()
    }
}

/// Statistics emitted exactly once when a session reaches completion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionReport {
    /// Wall-clock seconds from first start to completion, rounded
    pub total_time: u64,
    /// Exercises completed
    pub completed_exercises: usize,
    /// Exercises skipped
    pub skipped_exercises: usize,
}
