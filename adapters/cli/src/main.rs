#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter for inspecting Neural Break levels and running headless sessions.

mod config;
mod simulate;

use std::{io, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use neural_break_core::{GameMode, LevelConfig, GAME_TITLE};
use neural_break_system_level_generation::LevelGenerator;

use crate::{
    config::SimulationConfig,
    simulate::{Start, Summary},
};

/// Level inspection and headless simulation for Neural Break.
#[derive(Debug, Parser)]
#[command(name = "neural-break", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Action,
}

#[derive(Debug, Subcommand)]
enum Action {
    /// Lists every campaign level.
    Levels {
        /// Emit JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Shows one campaign level; out-of-range numbers are clamped.
    Level {
        /// Campaign level number.
        #[arg(allow_negative_numbers = true)]
        number: i64,
        /// Emit JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Shows one rogue layer.
    Rogue {
        /// Rogue layer, starting at 1.
        layer: u32,
        /// Emit JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Shows the test arena configuration.
    TestConfig {
        /// Emit JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Runs a headless session with a simulated player.
    Simulate {
        /// Game mode: arcade, test or rogue.
        #[arg(long, default_value = "arcade")]
        mode: GameMode,
        /// Campaign level to start from (arcade only).
        #[arg(long, allow_negative_numbers = true)]
        start_level: Option<i64>,
        /// TOML configuration file.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Overrides `session.seed`.
        #[arg(long)]
        seed: Option<u64>,
        /// Overrides `session.max_ticks`.
        #[arg(long)]
        max_ticks: Option<u64>,
    },
}

/// Entry point for the Neural Break command-line interface.
fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let generator = LevelGenerator::new();

    match cli.command {
        Action::Levels { json } => {
            let table = generator.level_table();
            if json {
                print_json(&table)?;
            } else {
                println!("{GAME_TITLE}");
                for config in &table {
                    print_summary_row(config);
                }
            }
        }
        Action::Level { number, json } => {
            print_config(&generator.campaign_level_config(number), json)?;
        }
        Action::Rogue { layer, json } => {
            print_config(&generator.rogue_level_config(layer), json)?;
        }
        Action::TestConfig { json } => {
            print_config(&generator.test_level_config(), json)?;
        }
        Action::Simulate {
            mode,
            start_level,
            config,
            seed,
            max_ticks,
        } => {
            let mut settings = match config {
                Some(path) => SimulationConfig::load(&path)
                    .with_context(|| format!("loading {}", path.display()))?,
                None => SimulationConfig::default(),
            };
            if let Some(seed) = seed {
                settings.session.seed = seed;
            }
            if let Some(max_ticks) = max_ticks {
                settings.session.max_ticks = max_ticks;
            }

            let start = Start::from_options(mode, start_level)?;
            let summary = simulate::run(&settings, start, io::stdout().lock())?;
            print_simulation_summary(&summary);
        }
    }

    Ok(())
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("serializing level data")?;
    println!("{text}");
    Ok(())
}

fn print_summary_row(config: &LevelConfig) {
    let kinds: Vec<String> = config.enabled_kinds().map(|kind| kind.to_string()).collect();
    println!(
        "{:>3}  {:<32} {:>6} kills  {}",
        config.level().number(),
        config.name(),
        config.objectives().total(),
        kinds.join(", ")
    );
}

fn print_config(config: &LevelConfig, json: bool) -> Result<()> {
    if json {
        return print_json(config);
    }

    println!("{} ({})", config.name(), config.level());
    for kind in config.enabled_kinds() {
        if let Some(quota) = config.quota(kind) {
            println!(
                "  {:<14} {:>7} kills  every {:>6.2}s",
                kind.tag(),
                quota.kills(),
                quota.spawn_interval()
            );
        }
    }
    println!("  total          {:>7} kills", config.objectives().total());
    Ok(())
}

fn print_simulation_summary(summary: &Summary) {
    println!(
        "{} ticks, {:?}, {} levels cleared, {:.1}s in play",
        summary.ticks,
        summary.final_state,
        summary.levels_cleared,
        summary.game_elapsed.as_secs_f32()
    );
    for (kind, count) in summary.kills.iter().filter(|(_, count)| **count > 0) {
        println!("  {:<14} {count:>6}", kind.tag());
    }
}
