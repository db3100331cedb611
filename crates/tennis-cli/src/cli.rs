//! CLI argument definitions for tennis.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tennis_core::MatchFormat;

#[derive(Parser)]
#[command(name = "tennis")]
#[command(about = "Point-by-point tennis score tracker", version)]
pub struct Args {
    /// Log games, sets and match completion to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Replay a sequence of points and show the score
    Score {
        /// Points in order: A = first server won the point, B = first returner ("-" reads stdin)
        points: String,
        /// Match format preset
        #[arg(short, long, env = "TENNIS_FORMAT", default_value = "best-of-three")]
        format: MatchFormat,
        /// Load match rules from a TOML file (overrides --format)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
        /// Show the score after every point
        #[arg(long)]
        each: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the built-in match formats
    Formats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
