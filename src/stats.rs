// ABOUTME: Running aggregate of finished sessions - totals, day streak, favorite goals
// ABOUTME: Keeps a bounded history of the most recent completed routines
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stretchease

//! # Session Stats
//!
//! Aggregates completion reports across sessions. The streak counts
//! consecutive calendar days with at least one finished session; the day
//! is passed in by the caller so the aggregator never reads the ambient
//! clock.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::constants::limits::STATS_HISTORY_LIMIT;
use crate::models::CompletionReport;

/// One finished session in the bounded history
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    /// Calendar day the session finished
    pub date: NaiveDate,
    /// Wall-clock seconds spent
    pub duration: u64,
    /// Number of exercises completed
    pub exercises: usize,
    /// Goal tags of the routine played
    pub goals: Vec<String>,
}

/// Running aggregate across all finished sessions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    /// Sessions finished, ever
    pub total_sessions: u64,
    /// Wall-clock seconds spent, ever
    pub total_time_spent: u64,
    /// Consecutive calendar days with a finished session
    pub streak_days: u32,
    /// Day of the most recent finished session
    pub last_session_date: Option<NaiveDate>,
    /// Finish count per goal tag
    pub favorite_goals: HashMap<String, u32>,
    /// Most recent sessions, bounded
    pub completed_routines: Vec<SessionRecord>,
}

impl SessionStats {
    /// Empty aggregate
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one completion report into the aggregate.
    ///
    /// `today` is the calendar day the session finished on.
    pub fn record(&mut self, report: &CompletionReport, goals: &[String], today: NaiveDate) {
        self.total_sessions += 1;
        self.total_time_spent += report.total_time;
        self.update_streak(today);

        for goal in goals {
            *self.favorite_goals.entry(goal.clone()).or_insert(0) += 1;
        }

        self.completed_routines.push(SessionRecord {
            date: today,
            duration: report.total_time,
            exercises: report.completed_exercises,
            goals: goals.to_vec(),
        });
        if self.completed_routines.len() > STATS_HISTORY_LIMIT {
            let excess = self.completed_routines.len() - STATS_HISTORY_LIMIT;
            self.completed_routines.drain(..excess);
        }
    }

    /// The goal tag finished most often, ties broken alphabetically
    #[must_use]
    pub fn top_goal(&self) -> Option<&str> {
        self.favorite_goals
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(goal, _)| goal.as_str())
    }

    fn update_streak(&mut self, today: NaiveDate) {
        match self.last_session_date {
            // Second session on the same day leaves the streak alone
            Some(last) if last == today => {}
            Some(last) if today - last == Duration::days(1) => self.streak_days += 1,
            _ => self.streak_days = 1,
        }
        self.last_session_date = Some(today);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(total_time: u64) -> CompletionReport {
        CompletionReport {
            total_time,
            completed_exercises: 5,
            skipped_exercises: 0,
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    #[test]
    fn test_totals_accumulate() {
        let mut stats = SessionStats::new();
        stats.record(&report(300), &["desk_break".to_owned()], day(1));
        stats.record(&report(150), &["desk_break".to_owned()], day(1));

        assert_eq!(stats.total_sessions, 2);
        assert_eq!(stats.total_time_spent, 450);
    }

    #[test]
    fn test_consecutive_days_extend_streak() {
        let mut stats = SessionStats::new();
        stats.record(&report(60), &[], day(1));
        stats.record(&report(60), &[], day(2));
        stats.record(&report(60), &[], day(3));
        assert_eq!(stats.streak_days, 3);
    }

    #[test]
    fn test_same_day_keeps_streak() {
        let mut stats = SessionStats::new();
        stats.record(&report(60), &[], day(1));
        stats.record(&report(60), &[], day(2));
        stats.record(&report(60), &[], day(2));
        assert_eq!(stats.streak_days, 2);
    }

    #[test]
    fn test_gap_resets_streak() {
        let mut stats = SessionStats::new();
        stats.record(&report(60), &[], day(1));
        stats.record(&report(60), &[], day(2));
        stats.record(&report(60), &[], day(5));
        assert_eq!(stats.streak_days, 1);
    }

    #[test]
    fn test_history_is_bounded() {
        let mut stats = SessionStats::new();
        for i in 0..40 {
            stats.record(&report(30), &[], day(1 + i % 28));
        }
        assert_eq!(stats.completed_routines.len(), STATS_HISTORY_LIMIT);
        assert_eq!(stats.total_sessions, 40);
    }

    #[test]
    fn test_top_goal() {
        let mut stats = SessionStats::new();
        stats.record(&report(60), &["flexibility".to_owned()], day(1));
        stats.record(
            &report(60),
            &["desk_break".to_owned(), "flexibility".to_owned()],
            day(2),
        );
        assert_eq!(stats.top_goal(), Some("flexibility"));
    }
}
