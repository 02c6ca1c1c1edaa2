// ABOUTME: OpenRouter secondary provider - chat completion with a requested JSON schema
// ABOUTME: Sends system/user messages and parses the reply strictly as a flat routine document
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stretchease

//! # OpenRouter Provider
//!
//! The secondary generative backend, tried when the primary has failed.
//! Unlike the primary (a raw completion engine), this is a chat API where
//! the prompt can request an exact JSON schema, so the reply is parsed
//! strictly - the only leniency is stripping a Markdown code fence.
//!
//! The prompt is tuned for a four-phase warm-up structure (gentle opener,
//! dynamic movement, targeted work, wind-down) flattened into one exercise
//! list by the model itself.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use super::{strip_code_fence, FlatDocument, ProviderPayload, RoutineProvider};
use crate::config::OpenRouterConfig;
use crate::errors::{AppError, AppResult};
use crate::models::{Preferences, RoutineSource};

/// Provider name used in logs and error messages
const PROVIDER_NAME: &str = "OpenRouter";

/// Chat completions endpoint
const API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Completion budget for one routine
const MAX_TOKENS: u32 = 2000;

/// Mild creativity; the schema is pinned by the prompt
const TEMPERATURE: f32 = 0.7;

/// System role instruction
const SYSTEM_PROMPT: &str =
    "You are a professional fitness and stretching expert. Generate safe, effective routines.";

// ============================================================================
// API Request/Response Types (OpenAI-compatible format)
// ============================================================================

/// Chat completion request body
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

/// Role-tagged message
#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

/// Chat completion response body
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

/// One choice in the response
#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

/// Message within a choice
#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// Error envelope
#[derive(Debug, Deserialize)]
struct ChatErrorResponse {
    error: ChatErrorDetail,
}

/// Error detail
#[derive(Debug, Deserialize)]
struct ChatErrorDetail {
    message: String,
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Secondary routine provider backed by an OpenRouter chat model
pub struct OpenRouterProvider {
    client: Client,
    config: OpenRouterConfig,
}

impl OpenRouterProvider {
    /// Create a provider for the given configuration
    #[must_use]
    pub fn new(config: OpenRouterConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Build the user prompt requesting the fixed JSON schema
    fn build_prompt(preferences: &Preferences) -> String {
        let minutes = (f64::from(preferences.duration) / 60.0).round() as u32;
        format!(
            "Generate a personalized stretching and warm-up routine with the following requirements:\n\
             \n\
             Duration: {} seconds ({minutes} minutes)\n\
             Goals: {}\n\
             Body Parts: {}\n\
             Equipment Available: {}\n\
             Difficulty Level: {}\n\
             Energy Level: {}\n\
             Specific Problems: {}\n\
             \n\
             Structure the routine as four phases flattened into one list: a gentle opener,\n\
             dynamic movement, targeted work for the requested body parts, and a wind-down.\n\
             \n\
             Respond with exactly this JSON structure and nothing else:\n\
             {{\n\
               \"routineName\": \"Name of the routine\",\n\
               \"exercises\": [\n\
                 {{\n\
                   \"name\": \"Exercise name\",\n\
                   \"duration\": 30,\n\
                   \"description\": \"Clear, concise instructions\",\n\
                   \"equipment\": [\"equipment needed\"],\n\
                   \"targetMuscles\": [\"muscles targeted\"],\n\
                   \"benefits\": [\"key benefits\"],\n\
                   \"tips\": \"Important form or safety tip\",\n\
                   \"videoSearchQuery\": \"search query for a tutorial video\"\n\
                 }}\n\
               ],\n\
               \"warmupTips\": [\"3-5 general tips\"],\n\
               \"cooldownAdvice\": \"Brief cooldown advice\"\n\
             }}\n\
             \n\
             Requirements:\n\
             - Each exercise should be 20-60 seconds\n\
             - Progress from gentle to more intensive\n\
             - Ensure total duration matches the requested time\n\
             - Make exercises appropriate for the difficulty level\n",
            preferences.duration,
            preferences.goals.join(", "),
            preferences.body_parts.join(", "),
            preferences.equipment.join(", "),
            preferences.difficulty.as_str(),
            preferences.energy_level.as_deref().unwrap_or("normal"),
            if preferences.problems.is_empty() {
                "none".to_owned()
            } else {
                preferences.problems.join(", ")
            },
        )
    }

    /// Map an error status to the failure taxonomy
    fn map_error_status(status: reqwest::StatusCode, body: &str) -> AppError {
        let detail = serde_json::from_str::<ChatErrorResponse>(body).map_or_else(
            |_| body.chars().take(200).collect::<String>(),
            |e| e.error.message,
        );

        match status.as_u16() {
            401 | 403 => AppError::provider_auth(PROVIDER_NAME, detail),
            429 => AppError::provider_rate_limited(PROVIDER_NAME, detail),
            _ => AppError::provider_transport(PROVIDER_NAME, format!("HTTP {status}: {detail}")),
        }
    }

    /// Parse the reply content strictly as the requested schema
    fn parse_reply(content: &str) -> AppResult<ProviderPayload> {
        let document = strip_code_fence(content);
        let doc: FlatDocument = serde_json::from_str(document).map_err(|e| {
            AppError::provider_malformed(PROVIDER_NAME, format!("reply is not the requested schema: {e}"))
        })?;
        Ok(ProviderPayload::Flat(doc))
    }
}

#[async_trait]
impl RoutineProvider for OpenRouterProvider {
    fn name(&self) -> &'static str {
        "openrouter"
    }

    fn source(&self) -> RoutineSource {
        RoutineSource::OpenRouter
    }

    #[instrument(skip(self, preferences), fields(model = %self.config.model))]
    async fn generate(&self, preferences: &Preferences) -> AppResult<ProviderPayload> {
        debug!("Sending chat completion request to OpenRouter");

        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_owned(),
                },
                ChatMessage {
                    role: "user",
                    content: Self::build_prompt(preferences),
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let response = self
            .client
            .post(API_URL)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to reach OpenRouter: {}", e);
                AppError::provider_transport(PROVIDER_NAME, format!("failed to connect: {e}"))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!("Failed to read OpenRouter response: {}", e);
            AppError::provider_transport(PROVIDER_NAME, format!("failed to read response: {e}"))
        })?;

        if !status.is_success() {
            return Err(Self::map_error_status(status, &body));
        }

        let chat_response: ChatResponse = serde_json::from_str(&body).map_err(|e| {
            AppError::provider_malformed(
                PROVIDER_NAME,
                format!("unexpected response envelope: {e}"),
            )
        })?;

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| {
                AppError::provider_malformed(PROVIDER_NAME, "response contained no choices")
            })?;

        debug!(chars = content.len(), "Received OpenRouter reply");

        Self::parse_reply(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Difficulty;

    fn prefs() -> Preferences {
        Preferences {
            duration: 600,
            goals: vec!["pre_workout".into()],
            body_parts: vec!["legs".into()],
            equipment: vec!["mat".into()],
            difficulty: Difficulty::Intermediate,
            energy_level: None,
            time_of_day: None,
            problems: vec!["tight hamstrings".into()],
        }
    }

    #[test]
    fn test_prompt_requests_exact_schema() {
        let prompt = OpenRouterProvider::build_prompt(&prefs());
        assert!(prompt.contains("exactly this JSON structure"));
        assert!(prompt.contains("\"routineName\""));
        assert!(prompt.contains("\"warmupTips\""));
        assert!(prompt.contains("tight hamstrings"));
        assert!(prompt.contains("four phases"));
    }

    #[test]
    fn test_bare_json_reply_parses() {
        let reply = r#"{"routineName": "Leg Prep", "exercises": [
            {"name": "Leg Swings", "duration": 40, "description": "swing"}
        ], "warmupTips": ["ease in"], "cooldownAdvice": "walk it off"}"#;

        let payload = OpenRouterProvider::parse_reply(reply).unwrap();
        match payload {
            ProviderPayload::Flat(doc) => {
                assert_eq!(doc.routine_name.as_deref(), Some("Leg Prep"));
                assert_eq!(doc.warmup_tips, vec!["ease in"]);
            }
            ProviderPayload::Phased(_) => panic!("expected flat payload"),
        }
    }

    #[test]
    fn test_fenced_reply_parses() {
        let reply = "```json\n{\"routineName\": \"F\", \"exercises\": [{\"name\": \"A\"}]}\n```";
        assert!(OpenRouterProvider::parse_reply(reply).is_ok());
    }

    #[test]
    fn test_commentary_reply_rejected() {
        // Strict path: surrounding prose fails the stage (unlike the primary)
        let reply = "Here is your routine: {\"exercises\": []}";
        let err = OpenRouterProvider::parse_reply(reply).unwrap_err();
        assert!(err.is_recoverable());
    }
}
