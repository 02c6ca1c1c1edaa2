// ABOUTME: Fixed exercise catalog backing the fallback routine synthesizer
// ABOUTME: Each entry is pre-tagged with body parts, goals, and equipment for filtering
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stretchease

//! # Fallback Exercise Catalog
//!
//! A small hardcoded catalog used when no generative provider is configured
//! or all of them fail. Entries carry static tags so the synthesizer can
//! filter by goal, body part, and available equipment without allocation.

use crate::constants::{body_parts, equipment, goals};
use crate::models::{Difficulty, Exercise, ExerciseKind};

/// One catalog entry with its filtering tags
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    /// Display name
    pub name: &'static str,
    /// Fixed duration in seconds
    pub duration: u32,
    /// Short instruction text
    pub description: &'static str,
    /// Body-part tags this entry targets
    pub body_parts: &'static [&'static str],
    /// Goal tags this entry serves
    pub goals: &'static [&'static str],
    /// Equipment tags required ("none" matches any setup)
    pub equipment: &'static [&'static str],
}

impl CatalogEntry {
    /// True when the entry needs no equipment or one of the available items
    #[must_use]
    pub fn matches_equipment(&self, available: &[String]) -> bool {
        self.equipment.contains(&equipment::NONE)
            || available.iter().any(|eq| self.equipment.contains(&eq.as_str()))
    }

    /// True when any requested goal is among this entry's goal tags
    #[must_use]
    pub fn matches_goals(&self, goals: &[String]) -> bool {
        goals.iter().any(|g| self.goals.contains(&g.as_str()))
    }

    /// True when any requested body part is targeted, or full body was asked for
    #[must_use]
    pub fn matches_body_parts(&self, body_parts: &[String]) -> bool {
        body_parts.iter().any(|p| p == body_parts::FULL_BODY)
            || body_parts.iter().any(|p| self.body_parts.contains(&p.as_str()))
    }

    /// Materialize this entry as a routine exercise
    #[must_use]
    pub fn to_exercise(&self) -> Exercise {
        Exercise {
            name: self.name.to_owned(),
            duration: self.duration,
            description: self.description.to_owned(),
            kind: ExerciseKind::Static,
            target_muscles: self.body_parts.iter().map(|p| (*p).to_owned()).collect(),
            difficulty: Difficulty::default(),
            equipment: self.equipment.iter().map(|e| (*e).to_owned()).collect(),
            benefits: Vec::new(),
            tips: None,
            video_search_query: Some(format!("{} stretching exercise tutorial", self.name)),
            video: None,
        }
    }
}

/// Universally safe entry injected when selection yields nothing
pub const SAFE_EXERCISE: CatalogEntry = CatalogEntry {
    name: "Cat-Cow Stretch",
    duration: 45,
    description: "Arch and round your back",
    body_parts: &[body_parts::UPPER_BACK, body_parts::LOWER_BACK],
    goals: &[goals::MORNING_WAKE_UP, goals::FLEXIBILITY],
    equipment: &[equipment::NONE],
};

/// The full fallback catalog
pub const CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        name: "Neck Rolls",
        duration: 30,
        description: "Gently roll your neck in circles",
        body_parts: &[body_parts::NECK],
        goals: &[goals::DESK_BREAK, goals::STRESS_RELIEF],
        equipment: &[equipment::NONE],
    },
    CatalogEntry {
        name: "Shoulder Shrugs",
        duration: 30,
        description: "Lift shoulders up to ears and release",
        body_parts: &[body_parts::SHOULDERS],
        goals: &[goals::DESK_BREAK, goals::STRESS_RELIEF],
        equipment: &[equipment::NONE],
    },
    CatalogEntry {
        name: "Arm Circles",
        duration: 40,
        description: "Make circles with your arms",
        body_parts: &[body_parts::SHOULDERS, body_parts::ARMS],
        goals: &[goals::MORNING_WAKE_UP, goals::PRE_WORKOUT],
        equipment: &[equipment::NONE],
    },
    CatalogEntry {
        name: "Cat-Cow Stretch",
        duration: 45,
        description: "Arch and round your back",
        body_parts: &[body_parts::UPPER_BACK, body_parts::LOWER_BACK],
        goals: &[goals::MORNING_WAKE_UP, goals::FLEXIBILITY],
        equipment: &[equipment::MAT],
    },
    CatalogEntry {
        name: "Forward Fold",
        duration: 45,
        description: "Bend forward to touch toes",
        body_parts: &[body_parts::LOWER_BACK, body_parts::LEGS],
        goals: &[goals::FLEXIBILITY, goals::BEDTIME_RELAX],
        equipment: &[equipment::NONE],
    },
    CatalogEntry {
        name: "Chest Opener",
        duration: 30,
        description: "Clasp hands behind back and lift",
        body_parts: &[body_parts::CHEST, body_parts::SHOULDERS],
        goals: &[goals::DESK_BREAK, goals::POST_WORKOUT],
        equipment: &[equipment::NONE],
    },
    CatalogEntry {
        name: "Hip Circles",
        duration: 40,
        description: "Circle hips in both directions",
        body_parts: &[body_parts::HIPS],
        goals: &[goals::PRE_WORKOUT, goals::FLEXIBILITY],
        equipment: &[equipment::NONE],
    },
    CatalogEntry {
        name: "Standing Quad Stretch",
        duration: 60,
        description: "Hold foot behind you, 30s each leg",
        body_parts: &[body_parts::LEGS],
        goals: &[goals::PRE_WORKOUT, goals::POST_WORKOUT],
        equipment: &[equipment::WALL],
    },
    CatalogEntry {
        name: "Calf Stretch",
        duration: 60,
        description: "Push against wall, 30s each leg",
        body_parts: &[body_parts::CALVES],
        goals: &[goals::PRE_WORKOUT, goals::POST_WORKOUT],
        equipment: &[equipment::WALL],
    },
    CatalogEntry {
        name: "Foam Roll Upper Back",
        duration: 60,
        description: "Roll slowly from mid to upper back",
        body_parts: &[body_parts::UPPER_BACK],
        goals: &[goals::POST_WORKOUT, goals::PAIN_RELIEF],
        equipment: &[equipment::FOAM_ROLLER],
    },
    CatalogEntry {
        name: "Lacrosse Ball Shoulder Release",
        duration: 60,
        description: "Roll ball on tight spots, 30s each side",
        body_parts: &[body_parts::SHOULDERS],
        goals: &[goals::PAIN_RELIEF, goals::POST_WORKOUT],
        equipment: &[equipment::LACROSSE_BALL],
    },
    CatalogEntry {
        name: "Band Chest Stretch",
        duration: 45,
        description: "Hold band behind back, pull apart gently",
        body_parts: &[body_parts::CHEST, body_parts::SHOULDERS],
        goals: &[goals::FLEXIBILITY, goals::DESK_BREAK],
        equipment: &[equipment::RESISTANCE_BAND],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_entry_has_tags() {
        for entry in CATALOG {
            assert!(!entry.body_parts.is_empty(), "{} has no body parts", entry.name);
            assert!(!entry.goals.is_empty(), "{} has no goals", entry.name);
            assert!(!entry.equipment.is_empty(), "{} has no equipment tags", entry.name);
            assert!(entry.duration > 0, "{} has zero duration", entry.name);
        }
    }

    #[test]
    fn test_none_equipment_always_matches() {
        let entry = &CATALOG[0];
        assert!(entry.matches_equipment(&["foam_roller".to_owned()]));
        assert!(entry.matches_equipment(&[]));
    }

    #[test]
    fn test_full_body_matches_everything() {
        let wanted = vec!["full_body".to_owned()];
        for entry in CATALOG {
            assert!(entry.matches_body_parts(&wanted), "{} missed full_body", entry.name);
        }
    }

    #[test]
    fn test_safe_exercise_needs_no_equipment() {
        assert!(SAFE_EXERCISE.matches_equipment(&[]));
    }

    #[test]
    fn test_to_exercise_builds_search_query() {
        let ex = CATALOG[0].to_exercise();
        assert_eq!(
            ex.video_search_query.as_deref(),
            Some("Neck Rolls stretching exercise tutorial")
        );
        assert_eq!(ex.duration, 30);
    }
}
