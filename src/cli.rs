//! Command-line interface for strictly_noughts.

use clap::{Parser, Subcommand};

/// Strictly Noughts - N×N noughts and crosses against the computer
#[derive(Parser, Debug)]
#[command(name = "strictly_noughts")]
#[command(about = "N×N noughts and crosses for humans and computer players", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play one game in the terminal
    Play {
        /// Path to match config (TOML)
        #[arg(short, long, default_value = "strictly_noughts.toml")]
        config: std::path::PathBuf,

        /// Cells per row/column (prompted for when neither flag nor config sets it)
        #[arg(short, long)]
        size: Option<usize>,

        /// Your name (prompted for when not given)
        #[arg(short, long)]
        name: Option<String>,

        /// Name of the second player
        #[arg(long)]
        opponent: Option<String>,

        /// Seed for a reproducible toss
        #[arg(long)]
        seed: Option<u64>,

        /// Ask again after a bad position instead of ending the game
        #[arg(long)]
        reprompt: bool,

        /// Second player is also human, sharing the keyboard
        #[arg(long)]
        two_humans: bool,

        /// Print the final game record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run many computer-vs-computer games concurrently
    Batch {
        /// Number of games
        #[arg(short, long, default_value = "10")]
        games: usize,

        /// Cells per row/column
        #[arg(short, long, default_value = "3")]
        size: usize,

        /// Seed for reproducible tosses
        #[arg(long)]
        seed: Option<u64>,
    },
}
