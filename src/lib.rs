// ABOUTME: Main library entry point for the Stretchease routine engine
// ABOUTME: Routine generation, fallback synthesis, video enrichment, and session playback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stretchease

#![deny(unsafe_code)]

//! # Stretchease
//!
//! The core engine of a stretching and mobility companion: it turns user
//! preferences into a structured routine and then plays that routine back
//! as a timed session.
//!
//! ## Features
//!
//! - **Generative providers**: a primary text-completion backend and a
//!   secondary chat backend, tried in priority order
//! - **Fallback synthesis**: a deterministic catalog-based generator so a
//!   routine is always produced, credentials or not
//! - **Video enrichment**: best-effort tutorial clip lookup per exercise
//! - **Session player**: a countdown state machine with audio cues,
//!   wake-lock handling, and a one-shot completion report
//! - **Stats**: running totals, day streaks, and favorite goals
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use stretchease::config::ProviderConfig;
//! use stretchease::generator::RoutineGenerator;
//! use stretchease::models::{Difficulty, Preferences};
//!
//! #[tokio::main]
//! async fn main() -> stretchease::errors::AppResult<()> {
//!     let preferences = Preferences {
//!         duration: 300,
//!         goals: vec!["desk_break".into()],
//!         body_parts: vec!["neck".into(), "shoulders".into()],
//!         equipment: vec!["none".into()],
//!         difficulty: Difficulty::Beginner,
//!         energy_level: None,
//!         time_of_day: None,
//!         problems: Vec::new(),
//!     };
//!
//!     let mut generator = RoutineGenerator::from_config(&ProviderConfig::from_env());
//!     let routine = generator.generate(&preferences).await?;
//!     println!("{} ({}s)", routine.name, routine.total_duration);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **Generator**: orchestrates providers, fallback, and enrichment
//! - **Providers**: wire clients for the generative backends
//! - **Session**: the playback state machine and its tick driver
//! - **Models**: canonical routine, exercise, and preference shapes
//! - **Config**: explicit credential injection, never ambient reads

pub mod config;
pub mod constants;
pub mod errors;
pub mod generator;
pub mod logging;
pub mod models;
pub mod providers;
pub mod session;
pub mod stats;
pub mod store;
pub mod utils;
pub mod validation;
pub mod videos;
