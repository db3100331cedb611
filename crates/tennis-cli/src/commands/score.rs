//! Score command implementation.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use serde::Serialize;
use tennis_core::{Match, MatchConfig, MatchFormat, Scoreboard};
use tracing::info;

use crate::cli_utils::{load_config, parse_points, read_points};

#[derive(Serialize)]
struct ScoreOutput<'a> {
    points_played: usize,
    config: MatchConfig,
    scoreboard: &'a Scoreboard,
}

/// Run the score command
pub fn run(
    points: &str,
    format: MatchFormat,
    config_file: Option<&Path>,
    each: bool,
    json: bool,
) -> Result<()> {
    let config = match config_file {
        Some(path) => load_config(path)?,
        None => format.config(),
    };
    let mut tennis_match = Match::new(config)?;

    let points = parse_points(&read_points(points)?)?;
    info!("Replaying {} points", points.len());

    for (i, &won) in points.iter().enumerate() {
        tennis_match
            .point(won)
            .with_context(|| format!("Failed to score point {}", i + 1))?;

        if each {
            let scoreboard = tennis_match.scoreboard();
            if json {
                println!("{}", serde_json::to_string(&scoreboard)?);
            } else {
                println!("{:>4}  {}", i + 1, format_scoreboard_line(&scoreboard));
            }
        }
    }

    let scoreboard = tennis_match.scoreboard();
    if json {
        if !each {
            let output = ScoreOutput {
                points_played: points.len(),
                config,
                scoreboard: &scoreboard,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    } else {
        print!("{}", format_scoreboard(&scoreboard));
    }

    Ok(())
}

fn player(first_server: bool) -> &'static str {
    if first_server { "A" } else { "B" }
}

/// One-line summary, e.g. `6-4 2-1 | 2-3`
fn format_scoreboard_line(scoreboard: &Scoreboard) -> String {
    let mut line = scoreboard
        .sets
        .iter()
        .map(|(a, b)| format!("{}-{}", a, b))
        .collect::<Vec<_>>()
        .join(" ");

    if let Some((a, b)) = scoreboard.points {
        let _ = write!(line, " | {}-{}", a, b);
        if scoreboard.tiebreak {
            line.push_str(" (tiebreak)");
        }
    }
    if let Some(winner) = scoreboard.winner {
        let _ = write!(line, " | {} wins", player(winner));
    }
    line
}

/// Multi-line scoreboard for the final state
fn format_scoreboard(scoreboard: &Scoreboard) -> String {
    let mut output = String::new();

    let sets = scoreboard
        .sets
        .iter()
        .map(|(a, b)| format!("{}-{}", a, b))
        .collect::<Vec<_>>()
        .join("  ");
    let (sets_a, sets_b) = scoreboard.sets_won;

    let _ = writeln!(output, "  SETS   : {} ({}-{})", sets, sets_a, sets_b);
    if let Some((a, b)) = scoreboard.points {
        let label = if scoreboard.tiebreak { "TIEBREAK" } else { "GAME" };
        let _ = writeln!(output, "  {:<7}: {}-{}", label, a, b);
    }
    if let Some(first_server) = scoreboard.first_server_to_serve {
        let _ = writeln!(output, "  SERVING: {}", player(first_server));
    }
    match scoreboard.winner {
        Some(winner) => {
            let _ = writeln!(output, "  WINNER : {}", player(winner).green().bold());
        }
        None => {
            let _ = writeln!(output, "  WINNER : {}", "-".dimmed());
        }
    }

    output
}
