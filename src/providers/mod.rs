// ABOUTME: Routine provider abstraction layer for pluggable generative backends
// ABOUTME: Defines the provider contract, payload shapes, and the normalizer into the canonical Routine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stretchease

//! # Routine Provider Service Provider Interface
//!
//! The contract generative backends implement to plug into the generation
//! orchestrator, plus the normalizer that reconciles their differing
//! response schemas into one canonical [`Routine`].
//!
//! ## Key Concepts
//!
//! - **`RoutineProvider`**: async trait for one-shot routine generation
//! - **`ProviderPayload`**: tagged union of the two response shapes seen in
//!   the wild - a phased document (ordered named stages) and a flat list
//! - **`normalize`**: the single place shape differences are resolved;
//!   nothing downstream of it sniffs provider schemas
//!
//! ## Example: Normalizing a payload
//!
//! ```rust
//! use stretchease::models::{Preferences, RoutineSource};
//! use stretchease::providers::{normalize, FlatDocument, ProviderPayload, RawExercise};
//!
//! let doc: FlatDocument = serde_json::from_str(
//!     r#"{"routineName":"Desk Reset","exercises":[{"name":"Neck Rolls","duration":30,
//!        "description":"Gently roll your neck in circles"}]}"#,
//! ).unwrap();
//! let prefs = Preferences {
//!     duration: 300,
//!     goals: vec!["desk_break".into()],
//!     body_parts: vec!["neck".into()],
//!     equipment: vec![],
//!     difficulty: Default::default(),
//!     energy_level: None,
//!     time_of_day: None,
//!     problems: vec![],
//! };
//! let routine = normalize(ProviderPayload::Flat(doc), &prefs, RoutineSource::OpenRouter).unwrap();
//! assert_eq!(routine.total_duration, 30);
//! ```

mod extract;
pub mod openrouter;
pub mod stretchgpt;

pub use extract::{extract_json_object, strip_code_fence};
pub use openrouter::OpenRouterProvider;
pub use stretchgpt::StretchGptProvider;

use async_trait::async_trait;
use serde::Deserialize;

use crate::constants::limits;
use crate::errors::{AppError, AppResult};
use crate::models::{
    Difficulty, Exercise, ExerciseKind, Preferences, Routine, RoutineSource,
};

// ============================================================================
// Provider contract
// ============================================================================

/// Contract for a generative routine backend.
///
/// Providers are invoked strictly in sequence by the orchestrator; a later
/// provider runs only after the earlier one has definitively failed.
#[async_trait]
pub trait RoutineProvider: Send + Sync {
    /// Short machine name used in logs and the `source` tag
    fn name(&self) -> &'static str;

    /// Which source tag routines from this provider carry
    fn source(&self) -> RoutineSource;

    /// Generate a routine payload for the given preferences.
    ///
    /// # Errors
    ///
    /// Returns a recoverable error on transport failure, malformed output,
    /// or missing credential; the orchestrator logs it and moves on.
    async fn generate(&self, preferences: &Preferences) -> AppResult<ProviderPayload>;
}

// ============================================================================
// Payload shapes
// ============================================================================

/// One exercise as a provider emits it; tolerant of missing fields
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawExercise {
    /// Display name
    pub name: String,
    /// Countdown seconds; zero means the provider left it out
    #[serde(default, alias = "duration_seconds")]
    pub duration: u32,
    /// Instructional text
    #[serde(default)]
    pub description: String,
    /// Movement style tag ("static", "dynamic", ...)
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    /// Targeted muscle groups
    #[serde(default, alias = "target_muscles", alias = "primaryMuscleGroups")]
    pub target_muscles: Vec<String>,
    /// Difficulty or intensity tag
    #[serde(default, alias = "intensity")]
    pub difficulty: Option<String>,
    /// Equipment tags
    #[serde(default)]
    pub equipment: Vec<String>,
    /// Benefit strings
    #[serde(default)]
    pub benefits: Vec<String>,
    /// Form or safety tip
    #[serde(default)]
    pub tips: Option<String>,
    /// Video lookup phrase
    #[serde(default, alias = "video_search_query")]
    pub video_search_query: Option<String>,
}

/// A named stage within a phased document
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phase {
    /// Stage name ("Warm-up", "Deep stretch", ...)
    #[serde(default, alias = "phase", alias = "title")]
    pub name: String,
    /// Exercises within this stage, in order
    #[serde(default)]
    pub exercises: Vec<RawExercise>,
}

/// Response shape of the primary provider: ordered named stages
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhasedDocument {
    /// Routine display name
    #[serde(default, alias = "name", alias = "routine_name")]
    pub routine_name: Option<String>,
    /// Ordered stages
    pub phases: Vec<Phase>,
    /// Explicit length estimate; summed exercise durations when absent
    #[serde(default, alias = "estimated_duration_minutes")]
    pub estimated_duration_minutes: Option<u32>,
    /// Routine-level tips
    #[serde(default, alias = "warmup_tips", alias = "tips")]
    pub warmup_tips: Vec<String>,
    /// Closing advice
    #[serde(default, alias = "cooldown_advice")]
    pub cooldown_advice: Option<String>,
}

/// Response shape of the secondary provider: one flat exercise list
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatDocument {
    /// Routine display name
    #[serde(default, alias = "name", alias = "routine_name")]
    pub routine_name: Option<String>,
    /// Exercises in order
    pub exercises: Vec<RawExercise>,
    /// Routine-level tips
    #[serde(default, alias = "warmup_tips", alias = "tips")]
    pub warmup_tips: Vec<String>,
    /// Closing advice
    #[serde(default, alias = "cooldown_advice")]
    pub cooldown_advice: Option<String>,
}

/// Tagged union of the provider response shapes
#[derive(Debug, Clone)]
pub enum ProviderPayload {
    /// Ordered named stages, each holding exercises
    Phased(PhasedDocument),
    /// One flat ordered exercise list
    Flat(FlatDocument),
}

// ============================================================================
// Normalizer
// ============================================================================

/// Default cooldown advice when the provider supplies none
const DEFAULT_COOLDOWN: &str = "Take deep breaths and move gently back to normal activity.";

/// Generic benefits used when no exercise carries any
const DEFAULT_BENEFITS: [&str; 4] = [
    "Improved flexibility",
    "Reduced muscle tension",
    "Better posture",
    "Increased blood flow",
];

/// Convert a provider payload into the canonical [`Routine`].
///
/// This is the only place the phased/flat schema difference is resolved:
/// phases are flattened in order, missing durations are defaulted, and the
/// total duration comes from the explicit estimate when the phased document
/// carries one, or from summing exercise durations otherwise.
///
/// # Errors
///
/// Returns [`AppError::provider_malformed`] when the payload contains no
/// exercises at all.
pub fn normalize(
    payload: ProviderPayload,
    preferences: &Preferences,
    source: RoutineSource,
) -> AppResult<Routine> {
    let (name, raw_exercises, tips, cooldown, estimate_minutes) = match payload {
        ProviderPayload::Phased(doc) => {
            let flattened: Vec<RawExercise> = doc
                .phases
                .into_iter()
                .flat_map(|phase| phase.exercises)
                .collect();
            (
                doc.routine_name,
                flattened,
                doc.warmup_tips,
                doc.cooldown_advice,
                doc.estimated_duration_minutes,
            )
        }
        ProviderPayload::Flat(doc) => (
            doc.routine_name,
            doc.exercises,
            doc.warmup_tips,
            doc.cooldown_advice,
            None,
        ),
    };

    if raw_exercises.is_empty() {
        return Err(AppError::provider_malformed(
            source.as_str(),
            "payload contains no exercises",
        ));
    }

    let exercises: Vec<Exercise> = raw_exercises
        .into_iter()
        .map(|raw| into_exercise(raw, preferences.difficulty))
        .collect();

    let summed: u32 = exercises.iter().map(|e| e.duration).sum();
    let total_duration = estimate_minutes.map_or(summed, |minutes| minutes.saturating_mul(60));

    let benefits = aggregate_benefits(&exercises);
    let tips = dedupe_cap(tips, limits::MAX_TIPS);

    Ok(Routine {
        name: name.unwrap_or_else(|| "Custom Stretch Routine".to_owned()),
        exercises,
        total_duration,
        difficulty: preferences.difficulty,
        benefits,
        tips,
        cooldown_advice: cooldown.unwrap_or_else(|| DEFAULT_COOLDOWN.to_owned()),
        is_fallback: false,
        source,
    })
}

/// Convert one raw exercise, defaulting the fields the provider left out
fn into_exercise(raw: RawExercise, fallback_difficulty: Difficulty) -> Exercise {
    let kind = raw
        .kind
        .as_deref()
        .map_or(ExerciseKind::Other, |tag| match tag.to_lowercase().as_str() {
            "static" => ExerciseKind::Static,
            "dynamic" => ExerciseKind::Dynamic,
            _ => ExerciseKind::Other,
        });

    let difficulty = raw
        .difficulty
        .as_deref()
        .map_or(fallback_difficulty, Difficulty::from_tag);

    let mut exercise = Exercise {
        name: raw.name,
        duration: raw.duration,
        description: raw.description,
        kind,
        target_muscles: raw.target_muscles,
        difficulty,
        equipment: raw.equipment,
        benefits: raw.benefits,
        tips: raw.tips,
        video_search_query: raw.video_search_query,
        video: None,
    };
    exercise.ensure_duration();
    exercise
}

/// Aggregate exercise-level benefits into the routine-level list,
/// defaulting to four generic strings when no exercise carries any
pub(crate) fn aggregate_benefits(exercises: &[Exercise]) -> Vec<String> {
    let collected: Vec<String> = exercises
        .iter()
        .flat_map(|e| e.benefits.iter().cloned())
        .collect();

    if collected.is_empty() {
        return DEFAULT_BENEFITS.iter().map(|&s| s.to_owned()).collect();
    }

    dedupe_cap(collected, limits::MAX_BENEFITS)
}

/// Deduplicate while preserving order, then cap the length
pub(crate) fn dedupe_cap(items: Vec<String>, cap: usize) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .take(cap)
        .collect()
}
