// ABOUTME: Fire-and-forget side effects emitted by the session state machine
// ABOUTME: Audio cues and wake-lock requests; failures never reach the player
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stretchease

use tracing::debug;

/// Audible cue categories the player emits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CueKind {
    /// Short per-second beep during the final countdown window
    Beep,
    /// Sharp tone when an exercise's countdown reaches zero
    Alert,
    /// Celebratory chord when the whole session completes
    Success,
}

/// Capability interface for session side effects.
///
/// The state machine calls these and never waits on them; implementations
/// must swallow their own failures. Correctness of the session never
/// depends on an effect having happened.
pub trait SessionEffects: Send + Sync {
    /// Play an audible cue
    fn play_cue(&self, kind: CueKind);

    /// Ask the host to keep the screen awake for the session
    fn request_wake_lock(&self);

    /// Release a previously requested wake-lock
    fn release_wake_lock(&self);
}

/// Default backend that only logs what would have happened.
///
/// Headless hosts (CLI, tests) have no audio device or screen to hold
/// awake, so the cues become trace output.
pub struct LoggingEffects;

impl SessionEffects for LoggingEffects {
    fn play_cue(&self, kind: CueKind) {
        debug!(?kind, "Session cue");
    }

    fn request_wake_lock(&self) {
        debug!("Wake-lock requested");
    }

    fn release_wake_lock(&self) {
        debug!("Wake-lock released");
    }
}
