// ABOUTME: Provider configuration injected into the generation pipeline
// ABOUTME: Holds API credentials and endpoints for StretchGPT, OpenRouter, and YouTube
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stretchease

//! # Provider Configuration
//!
//! Credentials and endpoints are passed explicitly into the orchestrator at
//! call time rather than read from ambient global state, so the pipeline is
//! testable without a simulated settings store. A missing credential is an
//! expected condition: the orchestrator skips that stage and moves on.

use std::env;

/// Environment variable for the primary provider token
const STRETCHGPT_TOKEN_ENV: &str = "STRETCHGPT_API_TOKEN";
/// Environment variable for the secondary provider key
const OPENROUTER_KEY_ENV: &str = "OPENROUTER_API_KEY";
/// Environment variable overriding the secondary provider model
const OPENROUTER_MODEL_ENV: &str = "OPENROUTER_MODEL";
/// Environment variable for the video lookup key
const YOUTUBE_KEY_ENV: &str = "YOUTUBE_API_KEY";

/// Default chat model requested from the secondary provider
pub const DEFAULT_OPENROUTER_MODEL: &str = "anthropic/claude-3-haiku";

/// Default inference endpoint for the primary provider
pub const DEFAULT_STRETCHGPT_URL: &str =
    "https://api-inference.huggingface.co/models/stretchease/stretchgpt";

/// Configuration for the primary text-completion provider
#[derive(Debug, Clone)]
pub struct StretchGptConfig {
    /// Bearer token for the inference API
    pub api_token: String,
    /// Model inference endpoint
    pub endpoint: String,
}

/// Configuration for the secondary chat-completion provider
#[derive(Debug, Clone)]
pub struct OpenRouterConfig {
    /// API key
    pub api_key: String,
    /// Model identifier to request
    pub model: String,
}

/// Configuration for the video lookup service
#[derive(Debug, Clone)]
pub struct VideoSearchConfig {
    /// API key
    pub api_key: String,
    /// Search endpoint; overridable for tests
    pub base_url: String,
}

impl VideoSearchConfig {
    /// Production search endpoint
    pub const DEFAULT_URL: &'static str = "https://www.googleapis.com/youtube/v3/search";

    /// Create a config pointing at the production endpoint
    #[must_use]
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: Self::DEFAULT_URL.to_owned(),
        }
    }
}

/// Full provider configuration for one generation call.
///
/// Any section may be absent; the orchestrator degrades through its chain
/// accordingly and a completely empty config always reaches the fallback.
#[derive(Debug, Clone, Default)]
pub struct ProviderConfig {
    /// Primary generative provider, tried first
    pub stretchgpt: Option<StretchGptConfig>,
    /// Secondary generative provider, tried on primary failure
    pub openrouter: Option<OpenRouterConfig>,
    /// Video enrichment lookup; absence leaves video references empty
    pub video_search: Option<VideoSearchConfig>,
}

impl ProviderConfig {
    /// Build a configuration from environment variables.
    ///
    /// Absent variables leave the corresponding provider unconfigured;
    /// this never fails.
    #[must_use]
    pub fn from_env() -> Self {
        let stretchgpt = env::var(STRETCHGPT_TOKEN_ENV)
            .ok()
            .filter(|t| !t.is_empty())
            .map(|api_token| StretchGptConfig {
                api_token,
                endpoint: env::var("STRETCHGPT_ENDPOINT")
                    .unwrap_or_else(|_| DEFAULT_STRETCHGPT_URL.to_owned()),
            });

        let openrouter = env::var(OPENROUTER_KEY_ENV)
            .ok()
            .filter(|k| !k.is_empty())
            .map(|api_key| OpenRouterConfig {
                api_key,
                model: env::var(OPENROUTER_MODEL_ENV)
                    .unwrap_or_else(|_| DEFAULT_OPENROUTER_MODEL.to_owned()),
            });

        let video_search = env::var(YOUTUBE_KEY_ENV)
            .ok()
            .filter(|k| !k.is_empty())
            .map(VideoSearchConfig::new);

        Self {
            stretchgpt,
            openrouter,
            video_search,
        }
    }

    /// Whether any generative provider is configured
    #[must_use]
    pub const fn has_generative_provider(&self) -> bool {
        self.stretchgpt.is_some() || self.openrouter.is_some()
    }
}
