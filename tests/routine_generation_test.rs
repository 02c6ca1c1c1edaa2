// ABOUTME: Integration tests for the routine generation pipeline
// ABOUTME: Provider chain ordering, payload normalization, fallback, and enrichment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stretchease

//! Routine Generation Pipeline Tests
//!
//! Exercises the orchestrator end to end with stub providers and a stub
//! video backend: first-success-wins ordering, graceful degradation to the
//! catalog fallback, and enrichment isolation.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use async_trait::async_trait;
use stretchease::errors::{AppError, AppResult};
use stretchease::generator::RoutineGenerator;
use stretchease::models::{Difficulty, Preferences, RoutineSource, VideoRef};
use stretchease::providers::{
    FlatDocument, Phase, PhasedDocument, ProviderPayload, RawExercise, RoutineProvider,
};
use stretchease::videos::VideoSearch;

fn preferences() -> Preferences {
    Preferences {
        duration: 300,
        goals: vec!["desk_break".to_owned()],
        body_parts: vec!["neck".to_owned(), "shoulders".to_owned()],
        equipment: vec!["none".to_owned()],
        difficulty: Difficulty::Beginner,
        energy_level: None,
        time_of_day: None,
        problems: Vec::new(),
    }
}

fn raw_exercise(name: &str, duration: u32) -> RawExercise {
    RawExercise {
        name: name.to_owned(),
        duration,
        description: format!("{name} instructions"),
        ..RawExercise::default()
    }
}

struct PhasedStub;

#[async_trait]
impl RoutineProvider for PhasedStub {
    fn name(&self) -> &'static str {
        "phased_stub"
    }
    fn source(&self) -> RoutineSource {
        RoutineSource::StretchGpt
    }
    async fn generate(&self, _preferences: &Preferences) -> AppResult<ProviderPayload> {
        Ok(ProviderPayload::Phased(PhasedDocument {
            routine_name: Some("Desk Reset".to_owned()),
            phases: vec![
                Phase {
                    name: "Warm-up".to_owned(),
                    exercises: vec![raw_exercise("Neck Rolls", 30)],
                },
                Phase {
                    name: "Deep stretch".to_owned(),
                    exercises: vec![
                        raw_exercise("Shoulder Shrugs", 30),
                        raw_exercise("Chest Opener", 40),
                    ],
                },
            ],
            estimated_duration_minutes: Some(5),
            warmup_tips: vec!["Sit tall first".to_owned()],
            cooldown_advice: Some("Shake it out".to_owned()),
        }))
    }
}

struct FlatStub;

#[async_trait]
impl RoutineProvider for FlatStub {
    fn name(&self) -> &'static str {
        "flat_stub"
    }
    fn source(&self) -> RoutineSource {
        RoutineSource::OpenRouter
    }
    async fn generate(&self, _preferences: &Preferences) -> AppResult<ProviderPayload> {
        Ok(ProviderPayload::Flat(FlatDocument {
            routine_name: Some("Backup Plan".to_owned()),
            exercises: vec![raw_exercise("Arm Circles", 40)],
            warmup_tips: Vec::new(),
            cooldown_advice: None,
        }))
    }
}

struct DownProvider;

#[async_trait]
impl RoutineProvider for DownProvider {
    fn name(&self) -> &'static str {
        "down"
    }
    fn source(&self) -> RoutineSource {
        RoutineSource::StretchGpt
    }
    async fn generate(&self, _preferences: &Preferences) -> AppResult<ProviderPayload> {
        Err(AppError::provider_transport("down", "connection refused"))
    }
}

struct EmptyPayloadProvider;

#[async_trait]
impl RoutineProvider for EmptyPayloadProvider {
    fn name(&self) -> &'static str {
        "empty"
    }
    fn source(&self) -> RoutineSource {
        RoutineSource::StretchGpt
    }
    async fn generate(&self, _preferences: &Preferences) -> AppResult<ProviderPayload> {
        Ok(ProviderPayload::Flat(FlatDocument {
            routine_name: None,
            exercises: Vec::new(),
            warmup_tips: Vec::new(),
            cooldown_advice: None,
        }))
    }
}

struct StubVideos;

#[async_trait]
impl VideoSearch for StubVideos {
    async fn search(&self, query: &str) -> AppResult<Option<VideoRef>> {
        if query.starts_with("Neck") {
            Ok(Some(VideoRef {
                video_id: "vid001".to_owned(),
                title: "Neck Rolls How-To".to_owned(),
            }))
        } else if query.starts_with("Shoulder") {
            Err(AppError::provider_transport("videos", "quota exceeded"))
        } else {
            Ok(None)
        }
    }
}

#[tokio::test]
async fn test_first_provider_wins() {
    let mut generator = RoutineGenerator::empty()
        .with_provider(Box::new(PhasedStub))
        .with_provider(Box::new(FlatStub));

    let routine = generator.generate(&preferences()).await.unwrap();

    assert_eq!(routine.name, "Desk Reset");
    assert_eq!(routine.source, RoutineSource::StretchGpt);
    assert!(!routine.is_fallback);
    // Phases flattened in document order
    let names: Vec<&str> = routine.exercises.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Neck Rolls", "Shoulder Shrugs", "Chest Opener"]);
    // Explicit estimate wins over summed durations
    assert_eq!(routine.total_duration, 300);
    assert_eq!(routine.summed_duration(), 100);
}

#[tokio::test]
async fn test_failed_primary_degrades_to_secondary() {
    let mut generator = RoutineGenerator::empty()
        .with_provider(Box::new(DownProvider))
        .with_provider(Box::new(FlatStub));

    let routine = generator.generate(&preferences()).await.unwrap();
    assert_eq!(routine.name, "Backup Plan");
    assert_eq!(routine.source, RoutineSource::OpenRouter);
    assert!(!routine.is_fallback);
}

#[tokio::test]
async fn test_empty_payload_counts_as_failure() {
    let mut generator = RoutineGenerator::empty()
        .with_provider(Box::new(EmptyPayloadProvider))
        .with_seed(9);

    let routine = generator.generate(&preferences()).await.unwrap();
    assert!(routine.is_fallback);
    assert!(!routine.exercises.is_empty());
}

#[tokio::test]
async fn test_no_credentials_scenario_hits_fallback_window() {
    let mut generator = RoutineGenerator::empty().with_seed(21);

    let routine = generator.generate(&preferences()).await.unwrap();

    assert!(routine.is_fallback);
    assert_eq!(routine.source, RoutineSource::Fallback);
    assert!(routine.total_duration > 0);
    assert!(
        (270..=330).contains(&routine.total_duration),
        "total {} outside the 270..=330 window",
        routine.total_duration
    );
}

#[tokio::test]
async fn test_enrichment_is_per_exercise_best_effort() {
    let mut generator = RoutineGenerator::empty()
        .with_provider(Box::new(PhasedStub))
        .with_video_search(Box::new(StubVideos));

    let routine = generator.generate(&preferences()).await.unwrap();

    assert_eq!(routine.exercises.len(), 3);
    assert_eq!(
        routine.exercises[0].video.as_ref().map(|v| v.video_id.as_str()),
        Some("vid001")
    );
    // Lookup error and empty result both leave the exercise untouched
    assert!(routine.exercises[1].video.is_none());
    assert!(routine.exercises[2].video.is_none());
}

#[tokio::test]
async fn test_validation_rejects_before_any_provider_call() {
    let mut generator = RoutineGenerator::empty().with_provider(Box::new(PhasedStub));

    let mut short = preferences();
    short.duration = 45;
    let err = generator.generate(&short).await.unwrap_err();
    assert!(err.to_string().contains("Duration must be at least 1 minute"));

    let mut no_parts = preferences();
    no_parts.body_parts.clear();
    no_parts.goals.clear();
    let err = generator.generate(&no_parts).await.unwrap_err();
    let message = err.to_string();
    assert!(message.contains("At least one goal must be selected"));
    assert!(message.contains("At least one body part must be selected"));
}
