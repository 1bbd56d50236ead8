//! Command-line interface for the arcade replay tool.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Arcade - headless driver for the arcade game engines
#[derive(Parser, Debug)]
#[command(name = "arcade")]
#[command(about = "Replay scripted arcade sessions and inspect presets", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Replay a scripted session and print its feedback and score
    Replay {
        /// Path to the replay script (TOML)
        script: PathBuf,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,

        /// Player stats file (JSON) to credit the score to; created if missing
        #[arg(long)]
        stats: Option<PathBuf>,

        /// Player name for a new stats file
        #[arg(long, default_value = "player")]
        player: String,
    },

    /// List the difficulty presets of every game
    Presets {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}
