// ABOUTME: Best-effort video enrichment - looks up a short tutorial clip per exercise
// ABOUTME: Lookup failures are isolated per exercise and never affect the routine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stretchease

//! # Video Enrichment
//!
//! Attaches an instructional video reference to each exercise via an external
//! video search API. This layer is strictly best-effort: a missing credential,
//! a network error, or an empty result set leaves the exercise's video as
//! `None` and moves on. One exercise's failure never touches its siblings.
//!
//! The search backend sits behind the [`VideoSearch`] trait so tests and the
//! generator can substitute a stub.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::config::VideoSearchConfig;
use crate::errors::{AppError, AppResult};
use crate::models::{Exercise, VideoRef};

/// Lookup of one short, embeddable tutorial clip for a search phrase
#[async_trait]
pub trait VideoSearch: Send + Sync {
    /// Return the best matching clip, or `None` when nothing suitable exists
    async fn search(&self, query: &str) -> AppResult<Option<VideoRef>>;
}

/// Attach video references to exercises in place, sequentially.
///
/// Same order, same length, no failures: every error is logged and the
/// affected exercise keeps `video = None`.
pub async fn enrich(search: &dyn VideoSearch, exercises: &mut [Exercise]) {
    for exercise in exercises.iter_mut() {
        if exercise.video.is_some() {
            continue;
        }
        let query = exercise.search_phrase();
        match search.search(&query).await {
            Ok(Some(video)) => {
                debug!(exercise = %exercise.name, video_id = %video.video_id, "Attached video");
                exercise.video = Some(video);
            }
            Ok(None) => {
                debug!(exercise = %exercise.name, "No suitable video found");
            }
            Err(e) => {
                warn!(exercise = %exercise.name, error = %e, "Video lookup failed, continuing");
            }
        }
    }
}

// ============================================================================
// YouTube Data API backend
// ============================================================================

/// YouTube search response envelope
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

/// One search result
#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchItemId,
    snippet: SearchSnippet,
}

/// Result identifier
#[derive(Debug, Deserialize)]
struct SearchItemId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

/// Result metadata
#[derive(Debug, Deserialize)]
struct SearchSnippet {
    title: String,
}

/// Video search backed by the YouTube Data API v3
pub struct YouTubeClient {
    client: Client,
    config: VideoSearchConfig,
}

impl YouTubeClient {
    /// Create a client for the given configuration
    #[must_use]
    pub fn new(config: VideoSearchConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Append "stretch" when the phrase lacks an exercise-ish keyword
    fn enhance_query(query: &str) -> String {
        let lower = query.to_lowercase();
        if lower.contains("stretch") || lower.contains("exercise") {
            query.to_owned()
        } else {
            format!("{query} stretch")
        }
    }
}

#[async_trait]
impl VideoSearch for YouTubeClient {
    #[instrument(skip(self))]
    async fn search(&self, query: &str) -> AppResult<Option<VideoRef>> {
        let enhanced = Self::enhance_query(query);

        let response = self
            .client
            .get(&self.config.base_url)
            .query(&[
                ("part", "snippet"),
                ("q", enhanced.as_str()),
                ("type", "video"),
                ("maxResults", "3"),
                ("videoEmbeddable", "true"),
                ("videoDuration", "short"),
                ("relevanceLanguage", "en"),
                ("safeSearch", "strict"),
                ("key", self.config.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                AppError::provider_transport("YouTube", format!("failed to connect: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::provider_transport(
                "YouTube",
                format!("HTTP {status}"),
            ));
        }

        let body: SearchResponse = response.json().await.map_err(|e| {
            AppError::provider_malformed("YouTube", format!("unexpected response: {e}"))
        })?;

        Ok(body.items.into_iter().find_map(|item| {
            item.id.video_id.map(|video_id| VideoRef {
                video_id,
                title: item.snippet.title,
            })
        }))
    }
}
