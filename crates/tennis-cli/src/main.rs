mod cli;
mod cli_utils;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Args, Command};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    // RUST_LOG wins; otherwise warn, or debug with --verbose
    let default_filter = if args.verbose {
        "tennis=debug,tennis_core=debug"
    } else {
        "tennis=warn,tennis_core=warn"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match args.command {
        Command::Score {
            points,
            format,
            config,
            each,
            json,
        } => commands::score::run(&points, format, config.as_deref(), each, json),
        Command::Formats { json } => commands::formats::run(json),
    }
}
