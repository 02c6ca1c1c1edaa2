// ABOUTME: Session player state machine - countdown playback through a routine
// ABOUTME: Elapsed-wall-clock timing, audio cues, wake-lock, one-shot completion report
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stretchease

//! # Session Player
//!
//! Drives one playback pass through a routine. States:
//!
//! ```text
//! idle -> running -> paused -> running -> ... -> completed
//! ```
//!
//! Any transition that changes the current exercise resets the countdown to
//! that exercise's full duration and stops the timer; the user must press
//! start again before it counts down. This is intentional: it forces
//! acknowledgement of the exercise change.
//!
//! The countdown is computed from wall-clock deltas against the injected
//! [`Clock`], not from per-tick decrements, so scheduling jitter in the tick
//! driver never accumulates drift. Pause captures elapsed-so-far and a later
//! start resumes from there.
//!
//! Audio cue rule: one beep per second while `0 < remaining <= 10`, one
//! alert at zero, one success chord at session completion.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info};

use crate::constants::limits::BEEP_WINDOW_SECONDS;
use crate::errors::{AppError, AppResult};
use crate::models::{CompletionReport, Exercise, Routine};

pub mod clock;
pub mod driver;
pub mod effects;

pub use clock::{Clock, ManualClock, SystemClock};
pub use driver::run_to_completion;
pub use effects::{CueKind, LoggingEffects, SessionEffects};

/// Player lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Timer loaded but not counting
    Idle,
    /// Timer counting down
    Running,
    /// Timer held mid-countdown
    Paused,
    /// Terminal; the completion report has been emitted
    Completed,
}

/// State machine for one playback session
pub struct SessionPlayer {
    routine: Routine,
    clock: Arc<dyn Clock>,
    effects: Arc<dyn SessionEffects>,
    state: SessionState,
    current_index: usize,
    /// Clock reading when the current countdown (re)started
    timer_origin_ms: Option<u64>,
    /// Elapsed captured at pause, credited on the next start
    paused_elapsed_ms: u64,
    /// Clock reading at the very first start of the session
    session_start_ms: Option<u64>,
    completed: HashSet<usize>,
    /// Last remaining-second value a beep was played for
    last_beep_second: Option<u32>,
    wake_lock_held: bool,
}

impl SessionPlayer {
    /// Create a player over a routine.
    ///
    /// # Errors
    ///
    /// Fails if the routine has no exercises; the generator guarantees
    /// non-empty output, so this guards against hand-built input only.
    pub fn new(
        routine: Routine,
        clock: Arc<dyn Clock>,
        effects: Arc<dyn SessionEffects>,
    ) -> AppResult<Self> {
        if routine.exercises.is_empty() {
            return Err(AppError::session_state("routine has no exercises to play"));
        }
        Ok(Self {
            routine,
            clock,
            effects,
            state: SessionState::Idle,
            current_index: 0,
            timer_origin_ms: None,
            paused_elapsed_ms: 0,
            session_start_ms: None,
            completed: HashSet::new(),
            last_beep_second: None,
            wake_lock_held: false,
        })
    }

    /// Current lifecycle state
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Index of the exercise the timer is attached to
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The exercise the timer is attached to
    #[must_use]
    pub fn current_exercise(&self) -> &Exercise {
        &self.routine.exercises[self.current_index]
    }

    /// The routine being played
    #[must_use]
    pub fn routine(&self) -> &Routine {
        &self.routine
    }

    /// Indices completed so far
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    /// Seconds left on the current exercise's countdown
    #[must_use]
    pub fn time_remaining(&self) -> u32 {
        let duration = self.current_exercise().duration;
        let elapsed_ms = match self.state {
            SessionState::Running => {
                let origin = self.timer_origin_ms.unwrap_or_else(|| self.clock.now_ms());
                self.clock.now_ms().saturating_sub(origin)
            }
            SessionState::Paused => self.paused_elapsed_ms,
            SessionState::Idle | SessionState::Completed => 0,
        };
        duration.saturating_sub(u32::try_from(elapsed_ms / 1000).unwrap_or(u32::MAX))
    }

    /// Begin or resume the countdown.
    ///
    /// The very first start of the session records the session start time
    /// and requests a wake-lock. No-op when already running or completed.
    pub fn start(&mut self) {
        match self.state {
            SessionState::Idle => {
                let now = self.clock.now_ms();
                self.timer_origin_ms = Some(now);
                self.paused_elapsed_ms = 0;
                if self.session_start_ms.is_none() {
                    self.session_start_ms = Some(now);
                    self.effects.request_wake_lock();
                    self.wake_lock_held = true;
                    info!(
                        exercises = self.routine.exercises.len(),
                        "Session started"
                    );
                }
                self.state = SessionState::Running;
            }
            SessionState::Paused => {
                // Shift the origin back so elapsed-so-far is preserved
                let now = self.clock.now_ms();
                self.timer_origin_ms = Some(now.saturating_sub(self.paused_elapsed_ms));
                self.state = SessionState::Running;
            }
            SessionState::Running | SessionState::Completed => {}
        }
    }

    /// Hold the countdown, capturing elapsed-so-far. No-op unless running.
    pub fn pause(&mut self) {
        if self.state != SessionState::Running {
            return;
        }
        let origin = self.timer_origin_ms.unwrap_or_else(|| self.clock.now_ms());
        self.paused_elapsed_ms = self.clock.now_ms().saturating_sub(origin);
        self.state = SessionState::Paused;
    }

    /// Periodic wakeup while running.
    ///
    /// Emits per-second beeps inside the final window, an alert at zero,
    /// and auto-advances when the countdown expires. Returns the completion
    /// report when that auto-advance finished the session.
    pub fn tick(&mut self) -> Option<CompletionReport> {
        if self.state != SessionState::Running {
            return None;
        }

        let remaining = self.time_remaining();

        if remaining == 0 {
            self.effects.play_cue(CueKind::Alert);
            return self.advance();
        }

        if remaining <= BEEP_WINDOW_SECONDS && self.last_beep_second != Some(remaining) {
            self.effects.play_cue(CueKind::Beep);
            self.last_beep_second = Some(remaining);
        }

        None
    }

    /// Move to the next exercise, or finish the session on the last one.
    ///
    /// The current exercise is counted as completed either way. Finishing is
    /// one-shot: further calls on a completed session are no-ops.
    pub fn advance(&mut self) -> Option<CompletionReport> {
        if self.state == SessionState::Completed {
            return None;
        }

        self.completed.insert(self.current_index);

        if self.current_index + 1 < self.routine.exercises.len() {
            self.current_index += 1;
            self.reset_timer();
            debug!(index = self.current_index, "Advanced to next exercise");
            None
        } else {
            Some(self.finish())
        }
    }

    /// Step back to the previous exercise. No-op at index zero.
    pub fn retreat(&mut self) {
        if self.current_index == 0 || self.state == SessionState::Completed {
            return;
        }
        self.current_index -= 1;
        // Going back means redoing it
        self.completed.remove(&self.current_index);
        self.reset_timer();
        debug!(index = self.current_index, "Retreated to previous exercise");
    }

    /// Jump directly to an exercise picked from the overview.
    ///
    /// # Errors
    ///
    /// Fails when the index is out of range or the session is completed.
    pub fn jump(&mut self, index: usize) -> AppResult<()> {
        if self.state == SessionState::Completed {
            return Err(AppError::session_state("session already completed"));
        }
        if index >= self.routine.exercises.len() {
            return Err(AppError::session_state(format!(
                "exercise index {index} out of range"
            )));
        }
        self.current_index = index;
        self.reset_timer();
        Ok(())
    }

    /// Abandon the session: stop the timer and release the wake-lock.
    ///
    /// Mandatory cleanup when navigating away mid-session.
    pub fn stop(&mut self) {
        self.reset_timer();
        self.release_wake_lock();
    }

    /// Reset the countdown to the current exercise's full duration, stopped
    fn reset_timer(&mut self) {
        self.state = SessionState::Idle;
        self.timer_origin_ms = None;
        self.paused_elapsed_ms = 0;
        self.last_beep_second = None;
    }

    fn finish(&mut self) -> CompletionReport {
        self.effects.play_cue(CueKind::Success);
        self.state = SessionState::Completed;
        self.release_wake_lock();

        let elapsed_ms = self
            .session_start_ms
            .map_or(0, |start| self.clock.now_ms().saturating_sub(start));
        let report = CompletionReport {
            total_time: (elapsed_ms + 500) / 1000,
            completed_exercises: self.completed.len(),
            skipped_exercises: 0,
        };
        info!(
            total_seconds = report.total_time,
            completed = report.completed_exercises,
            "Session completed"
        );
        report
    }

    fn release_wake_lock(&mut self) {
        if self.wake_lock_held {
            self.effects.release_wake_lock();
            self.wake_lock_held = false;
        }
    }
}

impl Drop for SessionPlayer {
    /// Wake-lock release is a mandatory cleanup path; abandoning the player
    /// mid-session must not leave the screen held awake.
    fn drop(&mut self) {
        self.release_wake_lock();
    }
}
