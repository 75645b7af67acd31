//! Command-line interface for strictly_hoops.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Hoops - two-player basketball shootout
#[derive(Parser, Debug)]
#[command(name = "strictly_hoops")]
#[command(about = "Turn-based basketball shootout in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a hot-seat match in the terminal
    Play {
        /// Path to a match config (TOML). Defaults are used when omitted.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Name for player one
        #[arg(long, default_value = "Player 1")]
        player_one: String,

        /// Name for player two
        #[arg(long, default_value = "Player 2")]
        player_two: String,

        /// Seed for reproducible matches
        #[arg(long)]
        seed: Option<u64>,

        /// Milliseconds per meter tick
        #[arg(long, default_value = "16")]
        frame_ms: u64,
    },

    /// Print make percentages across the power range
    Odds {
        /// Path to a match config (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Power step between rows
        #[arg(long, default_value = "10")]
        step: u32,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Check a match config file and report the first problem
    Validate {
        /// Path to the config file
        path: PathBuf,
    },
}
