//! Command-line interface for oracle_tictactoe.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Oracle Tic-Tac-Toe - play against a language model
#[derive(Parser, Debug)]
#[command(name = "oracle_tictactoe")]
#[command(about = "Tic-tac-toe against an LLM opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file
    #[arg(short, long, global = true, default_value = "oracle_tictactoe.toml")]
    pub config: PathBuf,

    /// Override the stats directory from the config
    #[arg(long, global = true)]
    pub stats_dir: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play games in the terminal
    Play {
        /// Play without contacting the LLM (fallback moves and commentary only)
        #[arg(long)]
        offline: bool,

        /// Seed for fallback moves
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Show accumulated statistics
    Stats,

    /// Reset statistics to zero
    ResetStats,
}
