// ABOUTME: Routine generation orchestrator - providers in priority order, then fallback
// ABOUTME: Provider failures are logged and swallowed; only validation errors propagate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stretchease

//! # Routine Generator
//!
//! Drives the full generation pipeline: validate preferences, try each
//! configured provider in priority order, normalize the first successful
//! payload, fall back to the catalog synthesizer when everything fails,
//! and finish with a best-effort video enrichment pass.
//!
//! The chain is first-success-wins. A provider failure (network, auth,
//! malformed reply) is logged at warn level and the next stage is tried;
//! the fallback stage cannot fail, so the only hard error out of
//! [`RoutineGenerator::generate`] is invalid preferences.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, instrument, warn};

use crate::config::ProviderConfig;
use crate::errors::{AppError, AppResult};
use crate::models::{Preferences, Routine};
use crate::providers::{normalize, OpenRouterProvider, RoutineProvider, StretchGptProvider};
use crate::validation::validate;
use crate::videos::{enrich, VideoSearch, YouTubeClient};

pub mod catalog;
pub mod fallback;

/// Orchestrates providers, fallback synthesis, and video enrichment
pub struct RoutineGenerator {
    providers: Vec<Box<dyn RoutineProvider>>,
    video_search: Option<Box<dyn VideoSearch>>,
    rng: ChaCha8Rng,
}

impl RoutineGenerator {
    /// Build a generator from environment-derived configuration.
    ///
    /// Unconfigured providers are simply absent from the chain; a generator
    /// with no providers serves fallback routines only.
    #[must_use]
    pub fn from_config(config: &ProviderConfig) -> Self {
        let mut generator = Self::empty();

        if let Some(stretchgpt) = &config.stretchgpt {
            generator
                .providers
                .push(Box::new(StretchGptProvider::new(stretchgpt.clone())));
        }
        if let Some(openrouter) = &config.openrouter {
            generator
                .providers
                .push(Box::new(OpenRouterProvider::new(openrouter.clone())));
        }
        if let Some(video) = &config.video_search {
            generator.video_search = Some(Box::new(YouTubeClient::new(video.clone())));
        }

        generator
    }

    /// A generator with no providers and no video search
    #[must_use]
    pub fn empty() -> Self {
        Self {
            providers: Vec::new(),
            video_search: None,
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Append a provider to the end of the chain
    #[must_use]
    pub fn with_provider(mut self, provider: Box<dyn RoutineProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    /// Set the video search backend
    #[must_use]
    pub fn with_video_search(mut self, search: Box<dyn VideoSearch>) -> Self {
        self.video_search = Some(search);
        self
    }

    /// Seed the fallback selection RNG for reproducible output
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self
    }

    /// Generate a routine for the given preferences.
    ///
    /// Fails only on invalid preferences; every downstream failure degrades
    /// to the next stage and ultimately to the catalog fallback.
    #[instrument(skip(self, preferences), fields(duration = preferences.duration))]
    pub async fn generate(&mut self, preferences: &Preferences) -> AppResult<Routine> {
        let validation = validate(preferences);
        if !validation.is_valid {
            return Err(AppError::invalid_preferences(validation.error));
        }

        let preferences = normalize_equipment(preferences);

        let mut routine = match self.try_providers(&preferences).await {
            Some(routine) => routine,
            None => {
                info!("All providers unavailable, synthesizing fallback routine");
                fallback::synthesize(&preferences, &mut self.rng)
            }
        };

        if let Some(search) = &self.video_search {
            enrich(search.as_ref(), &mut routine.exercises).await;
        }

        info!(
            source = routine.source.as_str(),
            exercises = routine.exercises.len(),
            total_seconds = routine.total_duration,
            "Routine generated"
        );
        Ok(routine)
    }

    /// Try each provider in order; first normalized success wins
    async fn try_providers(&self, preferences: &Preferences) -> Option<Routine> {
        for provider in &self.providers {
            debug!(provider = provider.name(), "Attempting routine provider");
            let outcome = provider
                .generate(preferences)
                .await
                .and_then(|payload| normalize(payload, preferences, provider.source()));
            match outcome {
                Ok(routine) => {
                    info!(provider = provider.name(), "Provider produced a routine");
                    return Some(routine);
                }
                Err(e) => {
                    warn!(provider = provider.name(), error = %e, "Provider failed, trying next stage");
                }
            }
        }
        None
    }
}

/// Empty equipment means bodyweight only
fn normalize_equipment(preferences: &Preferences) -> Preferences {
    let mut preferences = preferences.clone();
    if preferences.equipment.is_empty() {
        preferences.equipment = vec!["none".to_owned()];
    }
    preferences
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use crate::models::{Difficulty, RoutineSource};
    use crate::providers::{FlatDocument, ProviderPayload, RawExercise};

    struct FailingProvider;

    #[async_trait]
    impl RoutineProvider for FailingProvider {
        fn name(&self) -> &'static str {
            "failing"
        }
        fn source(&self) -> RoutineSource {
            RoutineSource::StretchGpt
        }
        async fn generate(&self, _preferences: &Preferences) -> AppResult<ProviderPayload> {
            Err(AppError::provider_transport("failing", "no route to host"))
        }
    }

    struct FixedProvider;

    #[async_trait]
    impl RoutineProvider for FixedProvider {
        fn name(&self) -> &'static str {
            "fixed"
        }
        fn source(&self) -> RoutineSource {
            RoutineSource::OpenRouter
        }
        async fn generate(&self, _preferences: &Preferences) -> AppResult<ProviderPayload> {
            Ok(ProviderPayload::Flat(FlatDocument {
                routine_name: Some("Canned".to_owned()),
                exercises: vec![RawExercise {
                    name: "Toe Touch".to_owned(),
                    duration: 30,
                    ..RawExercise::default()
                }],
                warmup_tips: Vec::new(),
                cooldown_advice: None,
            }))
        }
    }

    fn prefs() -> Preferences {
        Preferences {
            duration: 300,
            goals: vec!["desk_break".to_owned()],
            body_parts: vec!["neck".to_owned()],
            equipment: Vec::new(),
            difficulty: Difficulty::Beginner,
            energy_level: None,
            time_of_day: None,
            problems: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_invalid_preferences_propagate() {
        let mut generator = RoutineGenerator::empty();
        let mut preferences = prefs();
        preferences.goals.clear();

        let err = generator.generate(&preferences).await.unwrap_err();
        assert!(err.to_string().contains("At least one goal"));
    }

    #[tokio::test]
    async fn test_failed_provider_falls_through_to_next() {
        let mut generator = RoutineGenerator::empty()
            .with_provider(Box::new(FailingProvider))
            .with_provider(Box::new(FixedProvider));

        let routine = generator.generate(&prefs()).await.unwrap();
        assert_eq!(routine.name, "Canned");
        assert_eq!(routine.source, RoutineSource::OpenRouter);
        assert!(!routine.is_fallback);
    }

    #[tokio::test]
    async fn test_no_providers_yields_fallback() {
        let mut generator = RoutineGenerator::empty().with_seed(5);

        let routine = generator.generate(&prefs()).await.unwrap();
        assert!(routine.is_fallback);
        assert_eq!(routine.source, RoutineSource::Fallback);
        assert!(!routine.exercises.is_empty());
    }

    #[tokio::test]
    async fn test_empty_equipment_normalized_to_none() {
        let normalized = normalize_equipment(&prefs());
        assert_eq!(normalized.equipment, vec!["none".to_owned()]);
    }
}
