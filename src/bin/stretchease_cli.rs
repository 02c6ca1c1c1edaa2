// ABOUTME: Command-line front end - generate a routine and optionally play it headless
// ABOUTME: Provider credentials come from the environment; fallback works without any
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stretchease

//! # Stretchease CLI
//!
//! Generates a stretching routine from command-line preferences and prints
//! it, or plays it through the headless session driver with `--play`.

use anyhow::Result;
use clap::Parser;
use stretchease::{
    config::ProviderConfig,
    generator::RoutineGenerator,
    logging,
    models::{Difficulty, Preferences},
    session::{run_to_completion, LoggingEffects, SessionPlayer, SystemClock},
    utils::format_clock,
};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "stretchease")]
#[command(about = "Stretchease - personalized stretching routines in your terminal")]
pub struct Args {
    /// Routine length in seconds
    #[arg(long, default_value_t = 300)]
    duration: u32,

    /// Goal tags (morning_wake_up, desk_break, flexibility, ...)
    #[arg(long, value_delimiter = ',', default_value = "desk_break")]
    goals: Vec<String>,

    /// Body part tags (neck, shoulders, legs, full_body, ...)
    #[arg(long, value_delimiter = ',', default_value = "neck,shoulders")]
    body_parts: Vec<String>,

    /// Available equipment tags
    #[arg(long, value_delimiter = ',', default_value = "none")]
    equipment: Vec<String>,

    /// Difficulty: beginner, intermediate, or advanced
    #[arg(long, default_value = "beginner")]
    difficulty: String,

    /// Seed for reproducible fallback selection
    #[arg(long)]
    seed: Option<u64>,

    /// Play the routine as a timed session after generating it
    #[arg(long)]
    play: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_from_env()?;
    let args = Args::parse();

    let preferences = Preferences {
        duration: args.duration,
        goals: args.goals,
        body_parts: args.body_parts,
        equipment: args.equipment,
        difficulty: Difficulty::from_tag(&args.difficulty),
        energy_level: None,
        time_of_day: None,
        problems: Vec::new(),
    };

    let config = ProviderConfig::from_env();
    if !config.has_generative_provider() {
        info!("No provider credentials configured, fallback catalog will be used");
    }

    let mut generator = RoutineGenerator::from_config(&config);
    if let Some(seed) = args.seed {
        generator = generator.with_seed(seed);
    }

    let routine = generator.generate(&preferences).await?;

    println!("{} ({})", routine.name, format_clock(routine.total_duration));
    let stretch_time = routine.summed_duration();
    if stretch_time != routine.total_duration {
        // Provider estimates can pad the total beyond the exercise sum
        println!("  stretch time: {}", format_clock(stretch_time));
    }
    for (i, exercise) in routine.exercises.iter().enumerate() {
        println!(
            "  {}. {} - {} - {}",
            i + 1,
            exercise.name,
            format_clock(exercise.duration),
            exercise.description
        );
    }
    for tip in &routine.tips {
        println!("  tip: {tip}");
    }
    println!("  cooldown: {}", routine.cooldown_advice);

    if args.play {
        let mut player = SessionPlayer::new(
            routine,
            Arc::new(SystemClock::new()),
            Arc::new(LoggingEffects),
        )?;
        let report = run_to_completion(&mut player).await;
        println!(
            "Session done: {} exercises in {}",
            report.completed_exercises,
            format_clock(u32::try_from(report.total_time).unwrap_or(u32::MAX))
        );
    }

    Ok(())
}
