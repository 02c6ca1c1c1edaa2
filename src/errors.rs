// ABOUTME: Unified error handling with standard error codes for the routine pipeline
// ABOUTME: Defines AppError, ErrorCode taxonomy, and convenience constructors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stretchease

//! # Unified Error Handling System
//!
//! Centralized error types for the routine generation and playback pipeline.
//! The error code taxonomy mirrors the failure modes of the pipeline:
//! validation failures are terminal for a generation attempt, configuration
//! and provider failures are recoverable (the orchestrator skips forward),
//! and catalog exhaustion is the only hard failure the fallback can produce.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Validation (1000-1999)
    #[serde(rename = "INVALID_PREFERENCES")]
    InvalidPreferences = 1000,
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 1001,
    #[serde(rename = "VALUE_OUT_OF_RANGE")]
    ValueOutOfRange = 1002,

    // Configuration (2000-2999)
    #[serde(rename = "CONFIG_MISSING")]
    ConfigMissing = 2000,
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid = 2001,

    // External providers (3000-3999)
    #[serde(rename = "PROVIDER_UNAVAILABLE")]
    ProviderUnavailable = 3000,
    #[serde(rename = "PROVIDER_TRANSPORT")]
    ProviderTransport = 3001,
    #[serde(rename = "PROVIDER_RESPONSE_MALFORMED")]
    ProviderResponseMalformed = 3002,
    #[serde(rename = "PROVIDER_AUTH_FAILED")]
    ProviderAuthFailed = 3003,
    #[serde(rename = "PROVIDER_RATE_LIMITED")]
    ProviderRateLimited = 3004,

    // Routine synthesis (4000-4999)
    #[serde(rename = "CATALOG_EXHAUSTED")]
    CatalogExhausted = 4000,

    // Session playback (5000-5999)
    #[serde(rename = "SESSION_STATE")]
    SessionState = 5000,

    // Internal (9000-9999)
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9001,
}

impl ErrorCode {
    /// Whether the orchestrator may recover from this error by moving to
    /// the next generation stage
    #[must_use]
    pub const fn is_recoverable(self) -> bool {
        matches!(
            self,
            Self::ConfigMissing
                | Self::ConfigInvalid
                | Self::ProviderUnavailable
                | Self::ProviderTransport
                | Self::ProviderResponseMalformed
                | Self::ProviderAuthFailed
                | Self::ProviderRateLimited
        )
    }

    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::InvalidPreferences => "The provided preferences are incomplete or invalid",
            Self::InvalidInput => "The provided input is invalid",
            Self::ValueOutOfRange => "The provided value is outside the acceptable range",
            Self::ConfigMissing => "Required configuration is missing",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::ProviderUnavailable => "The routine provider is currently unavailable",
            Self::ProviderTransport => "Communication with the routine provider failed",
            Self::ProviderResponseMalformed => "The routine provider returned malformed data",
            Self::ProviderAuthFailed => "Authentication with the routine provider failed",
            Self::ProviderRateLimited => "The routine provider rate limit was exceeded",
            Self::CatalogExhausted => "The fallback catalog produced no exercises",
            Self::SessionState => "The session is not in a valid state for this operation",
            Self::InternalError => "An internal error occurred",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Whether the orchestrator may recover by moving to the next stage
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        self.code.is_recoverable()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors for common errors
impl AppError {
    /// Preference validation failure; `message` is the joined rule list
    pub fn invalid_preferences(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidPreferences, message)
    }

    /// Invalid input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Missing configuration (API credential, endpoint)
    pub fn config_missing(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigMissing, message)
    }

    /// Provider authentication failure
    pub fn provider_auth(provider: &str, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ProviderAuthFailed,
            format!("{provider}: {}", message.into()),
        )
    }

    /// Provider transport failure (connection, read)
    pub fn provider_transport(provider: &str, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ProviderTransport,
            format!("{provider}: {}", message.into()),
        )
    }

    /// Provider returned a body the normalizer cannot use
    pub fn provider_malformed(provider: &str, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ProviderResponseMalformed,
            format!("{provider}: {}", message.into()),
        )
    }

    /// Provider rate limit exceeded
    pub fn provider_rate_limited(provider: &str, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ProviderRateLimited,
            format!("{provider}: {}", message.into()),
        )
    }

    /// Fallback catalog produced zero exercises
    pub fn catalog_exhausted(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::CatalogExhausted, message)
    }

    /// Session state machine misuse
    pub fn session_state(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SessionState, message)
    }

    /// Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

/// Conversion from `anyhow::Error` to `AppError`
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::new(ErrorCode::InternalError, error.to_string())
    }
}

/// Conversion from `serde_json::Error` to `AppError`
impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(ErrorCode::SerializationError, error.to_string()).with_source(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_codes() {
        assert!(ErrorCode::ConfigMissing.is_recoverable());
        assert!(ErrorCode::ProviderTransport.is_recoverable());
        assert!(ErrorCode::ProviderResponseMalformed.is_recoverable());
        assert!(!ErrorCode::InvalidPreferences.is_recoverable());
        assert!(!ErrorCode::CatalogExhausted.is_recoverable());
    }

    #[test]
    fn test_app_error_display() {
        let error = AppError::provider_malformed("StretchGPT", "no JSON object in response");
        let rendered = error.to_string();
        assert!(rendered.contains("malformed"));
        assert!(rendered.contains("StretchGPT"));
    }

    #[test]
    fn test_error_code_serialization() {
        let json = serde_json::to_string(&ErrorCode::CatalogExhausted).unwrap();
        assert_eq!(json, "\"CATALOG_EXHAUSTED\"");
    }
}
