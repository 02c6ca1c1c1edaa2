// ABOUTME: StretchGPT primary provider - HuggingFace-style text-completion inference
// ABOUTME: Builds the routine prompt, extracts embedded JSON, and yields a phased payload
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stretchease

//! # StretchGPT Provider
//!
//! The primary generative backend: a fine-tuned text-completion model
//! served behind a HuggingFace Inference-style endpoint. It is a free-text
//! engine, so the response is expected to *embed* a JSON document rather
//! than be one; a brace-matching extraction step is mandatory before
//! parsing.
//!
//! The model was tuned on phased plans (ordered named stages, each holding
//! exercises), so the extracted document usually carries a `phases`
//! grouping; a flat list is accepted as well and both are resolved by the
//! normalizer.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use super::{
    extract_json_object, FlatDocument, PhasedDocument, ProviderPayload, RoutineProvider,
};
use crate::config::StretchGptConfig;
use crate::errors::{AppError, AppResult};
use crate::models::{Preferences, RoutineSource};

/// Provider name used in logs and error messages
const PROVIDER_NAME: &str = "StretchGPT";

/// Completion budget for one routine
const MAX_NEW_TOKENS: u32 = 1500;

/// Low temperature: the model should follow the schema, not improvise
const TEMPERATURE: f32 = 0.1;

// ============================================================================
// API Request/Response Types (HuggingFace Inference format)
// ============================================================================

/// Inference request body
#[derive(Debug, Serialize)]
struct InferenceRequest {
    inputs: String,
    parameters: InferenceParameters,
}

/// Sampling parameters for the completion
#[derive(Debug, Serialize)]
struct InferenceParameters {
    max_new_tokens: u32,
    temperature: f32,
    do_sample: bool,
    return_full_text: bool,
}

/// One generation in the inference response
#[derive(Debug, Deserialize)]
struct InferenceGeneration {
    generated_text: String,
}

/// Inference API error body
#[derive(Debug, Deserialize)]
struct InferenceError {
    error: String,
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Primary routine provider backed by a text-completion inference endpoint
pub struct StretchGptProvider {
    client: Client,
    config: StretchGptConfig,
}

impl StretchGptProvider {
    /// Create a provider for the given endpoint configuration
    #[must_use]
    pub fn new(config: StretchGptConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Build the completion prompt encoding the user's preferences
    fn build_prompt(preferences: &Preferences) -> String {
        let minutes = (f64::from(preferences.duration) / 60.0).round() as u32;
        let mut prompt = format!(
            "Create a stretching routine as a JSON plan with ordered phases.\n\
             Duration: {} seconds ({minutes} minutes)\n\
             Goals: {}\n\
             Target areas: {}\n\
             Equipment available: {}\n\
             Difficulty: {}\n",
            preferences.duration,
            preferences.goals.join(", "),
            preferences.body_parts.join(", "),
            preferences.equipment.join(", "),
            preferences.difficulty.as_str(),
        );
        if let Some(energy) = &preferences.energy_level {
            prompt.push_str(&format!("Energy level: {energy}\n"));
        }
        if !preferences.problems.is_empty() {
            prompt.push_str(&format!(
                "Specific problems: {}\n",
                preferences.problems.join(", ")
            ));
        }
        prompt.push_str(
            "Respond with a JSON object: {\"routineName\", \"phases\": \
             [{\"name\", \"exercises\": [{\"name\", \"duration\", \"description\", \
             \"targetMuscles\", \"benefits\", \"tips\"}]}], \
             \"estimated_duration_minutes\", \"warmupTips\", \"cooldownAdvice\"}.\n",
        );
        prompt
    }

    /// Map an error status to the failure taxonomy
    fn map_error_status(status: reqwest::StatusCode, body: &str) -> AppError {
        let detail = serde_json::from_str::<InferenceError>(body)
            .map_or_else(|_| body.chars().take(200).collect::<String>(), |e| e.error);

        match status.as_u16() {
            401 | 403 => AppError::provider_auth(PROVIDER_NAME, detail),
            429 => AppError::provider_rate_limited(PROVIDER_NAME, detail),
            _ => AppError::provider_transport(
                PROVIDER_NAME,
                format!("HTTP {status}: {detail}"),
            ),
        }
    }

    /// Extract and parse the embedded JSON document from a completion
    fn parse_completion(text: &str) -> AppResult<ProviderPayload> {
        let json_slice = extract_json_object(text).ok_or_else(|| {
            AppError::provider_malformed(PROVIDER_NAME, "no JSON object in completion")
        })?;

        let value: serde_json::Value = serde_json::from_str(json_slice).map_err(|e| {
            AppError::provider_malformed(PROVIDER_NAME, format!("embedded JSON invalid: {e}"))
        })?;

        if value.get("phases").is_some() {
            let doc: PhasedDocument = serde_json::from_value(value).map_err(|e| {
                AppError::provider_malformed(PROVIDER_NAME, format!("phased schema: {e}"))
            })?;
            Ok(ProviderPayload::Phased(doc))
        } else {
            let doc: FlatDocument = serde_json::from_value(value).map_err(|e| {
                AppError::provider_malformed(PROVIDER_NAME, format!("flat schema: {e}"))
            })?;
            Ok(ProviderPayload::Flat(doc))
        }
    }
}

#[async_trait]
impl RoutineProvider for StretchGptProvider {
    fn name(&self) -> &'static str {
        "stretchgpt"
    }

    fn source(&self) -> RoutineSource {
        RoutineSource::StretchGpt
    }

    #[instrument(skip(self, preferences), fields(duration = preferences.duration))]
    async fn generate(&self, preferences: &Preferences) -> AppResult<ProviderPayload> {
        debug!("Sending completion request to StretchGPT");

        let request = InferenceRequest {
            inputs: Self::build_prompt(preferences),
            parameters: InferenceParameters {
                max_new_tokens: MAX_NEW_TOKENS,
                temperature: TEMPERATURE,
                do_sample: true,
                return_full_text: false,
            },
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .header("Authorization", format!("Bearer {}", self.config.api_token))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to reach StretchGPT endpoint: {}", e);
                AppError::provider_transport(PROVIDER_NAME, format!("failed to connect: {e}"))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!("Failed to read StretchGPT response: {}", e);
            AppError::provider_transport(PROVIDER_NAME, format!("failed to read response: {e}"))
        })?;

        if !status.is_success() {
            return Err(Self::map_error_status(status, &body));
        }

        let generations: Vec<InferenceGeneration> =
            serde_json::from_str(&body).map_err(|e| {
                AppError::provider_malformed(
                    PROVIDER_NAME,
                    format!("unexpected response envelope: {e}"),
                )
            })?;

        let generation = generations.into_iter().next().ok_or_else(|| {
            AppError::provider_malformed(PROVIDER_NAME, "response contained no generations")
        })?;

        debug!(
            chars = generation.generated_text.len(),
            "Received StretchGPT completion"
        );

        Self::parse_completion(&generation.generated_text)
    }
}
