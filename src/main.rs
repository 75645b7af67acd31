//! Strictly Hoops - Unified CLI
//!
//! Terminal shootout plus tooling for tuning match configs.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use std::path::{Path, PathBuf};
use strictly_hoops::{MatchConfig, PlayOptions, ShotModel, ShotType, run_tui};
use strum::IntoEnumIterator;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            config,
            player_one,
            player_two,
            seed,
            frame_ms,
        } => {
            let config = load_config(config.as_deref())?;
            run_tui(PlayOptions {
                config,
                player_one,
                player_two,
                seed,
                frame_ms,
            })
            .await
        }
        Command::Odds { config, step, json } => {
            init_stderr_logging();
            print_odds(config.as_deref(), step, json)
        }
        Command::Validate { path } => {
            init_stderr_logging();
            validate(path)
        }
    }
}

/// Logs to stderr so stdout stays machine-readable.
fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<MatchConfig> {
    match path {
        Some(path) => Ok(MatchConfig::from_file(path)?),
        None => Ok(MatchConfig::default()),
    }
}

/// Prints make percentages for each shot type across the power range.
#[instrument]
fn print_odds(config: Option<&Path>, step: u32, json: bool) -> Result<()> {
    let config = load_config(config)?;
    let model = ShotModel::new(config.shots().clone(), config.power().clone());
    let rows = model.odds_table(step);
    info!(rows = rows.len(), "Odds table computed");

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    print!("{:>6}", "power");
    for shot in ShotType::iter() {
        print!("{:>8}", shot.to_string());
    }
    println!();
    for row in &rows {
        print!("{:>6}", row.power);
        for pct in row.percentages {
            print!("{:>7.1}%", pct);
        }
        println!();
    }
    Ok(())
}

/// Loads a config file and reports whether it is usable.
#[instrument]
fn validate(path: PathBuf) -> Result<()> {
    let config = MatchConfig::from_file(&path)?;
    info!(path = %path.display(), "Config is valid");
    println!(
        "{} is valid (end condition: {:?})",
        path.display(),
        config.end_condition()
    );
    Ok(())
}
