// ABOUTME: Preference validation gate run before any generation attempt
// ABOUTME: Accumulates rule failures into one joined human-readable message
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stretchease

//! # Preference Validation
//!
//! A pure gate run before generation. All rules are checked and their
//! failures joined into a single message, so the user sees every problem at
//! once. Callers must not invoke the generator when validation fails.

use crate::constants::limits;
use crate::models::Preferences;

/// Outcome of validating a preference bundle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    /// Whether every rule passed
    pub is_valid: bool,
    /// Joined failure message; empty when valid
    pub error: String,
}

impl Validation {
    const fn valid() -> Self {
        Self {
            is_valid: true,
            error: String::new(),
        }
    }

    fn invalid(errors: &[String]) -> Self {
        Self {
            is_valid: false,
            error: errors.join(". "),
        }
    }
}

/// Validate a preference bundle for minimal completeness.
///
/// Rules: duration of at least one minute, at least one goal, at least one
/// body part. Pure function, no side effects.
#[must_use]
pub fn validate(preferences: &Preferences) -> Validation {
    let mut errors = Vec::new();

    if preferences.duration < limits::MIN_ROUTINE_SECONDS {
        errors.push("Duration must be at least 1 minute".to_owned());
    }

    if preferences.goals.is_empty() {
        errors.push("At least one goal must be selected".to_owned());
    }

    if preferences.body_parts.is_empty() {
        errors.push("At least one body part must be selected".to_owned());
    }

    if errors.is_empty() {
        Validation::valid()
    } else {
        Validation::invalid(&errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_preferences() -> Preferences {
        Preferences {
            duration: 300,
            goals: vec!["desk_break".into()],
            body_parts: vec!["neck".into()],
            equipment: vec![],
            difficulty: crate::models::Difficulty::Beginner,
            energy_level: None,
            time_of_day: None,
            problems: vec![],
        }
    }

    #[test]
    fn test_valid_bundle_passes() {
        let result = validate(&valid_preferences());
        assert!(result.is_valid);
        assert!(result.error.is_empty());
    }

    #[test]
    fn test_short_duration_fails() {
        let mut prefs = valid_preferences();
        prefs.duration = 59;
        let result = validate(&prefs);
        assert!(!result.is_valid);
        assert!(result.error.contains("at least 1 minute"));
    }

    #[test]
    fn test_all_failures_joined() {
        let prefs = Preferences {
            duration: 0,
            goals: vec![],
            body_parts: vec![],
            ..valid_preferences()
        };
        let result = validate(&prefs);
        assert!(!result.is_valid);
        assert!(result.error.contains("1 minute"));
        assert!(result.error.contains("goal"));
        assert!(result.error.contains("body part"));
        // Distinct rules, one joined message
        assert_eq!(result.error.matches(". ").count(), 2);
    }
}
