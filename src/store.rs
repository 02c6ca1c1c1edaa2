// ABOUTME: Saved-routine store - keeps generated routines with their preferences
// ABOUTME: In-memory keyed by UUID; the storage backend sits behind a trait
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stretchease

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::{Preferences, Routine};

/// A routine saved together with the preferences that produced it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedRoutine {
    /// Store key
    pub id: Uuid,
    /// When the routine was saved
    pub saved_at: DateTime<Utc>,
    /// The generated routine
    pub routine: Routine,
    /// Preferences it was generated from, kept for regeneration
    pub preferences: Preferences,
}

/// Key-value persistence for routines
pub trait RoutineStore: Send + Sync {
    /// Save a routine with its originating preferences, returning the key
    fn save(&mut self, routine: Routine, preferences: Preferences) -> Uuid;

    /// Look up a saved routine by key
    ///
    /// # Errors
    ///
    /// Fails when no routine exists under the key.
    fn get(&self, id: Uuid) -> AppResult<SavedRoutine>;

    /// All saved routines, newest first
    fn list(&self) -> Vec<SavedRoutine>;

    /// Remove a saved routine
    ///
    /// # Errors
    ///
    /// Fails when no routine exists under the key.
    fn delete(&mut self, id: Uuid) -> AppResult<()>;
}

/// In-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    routines: HashMap<Uuid, SavedRoutine>,
}

impl MemoryStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl RoutineStore for MemoryStore {
    fn save(&mut self, routine: Routine, preferences: Preferences) -> Uuid {
        let id = Uuid::new_v4();
        self.routines.insert(
            id,
            SavedRoutine {
                id,
                saved_at: Utc::now(),
                routine,
                preferences,
            },
        );
        id
    }

    fn get(&self, id: Uuid) -> AppResult<SavedRoutine> {
        self.routines
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::invalid_input(format!("no saved routine with id {id}")))
    }

    fn list(&self) -> Vec<SavedRoutine> {
        let mut all: Vec<SavedRoutine> = self.routines.values().cloned().collect();
        all.sort_by(|a, b| b.saved_at.cmp(&a.saved_at));
        all
    }

    fn delete(&mut self, id: Uuid) -> AppResult<()> {
        self.routines
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::invalid_input(format!("no saved routine with id {id}")))
    }
}
