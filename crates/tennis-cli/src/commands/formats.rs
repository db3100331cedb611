//! Formats command implementation.

use anyhow::Result;
use owo_colors::OwoColorize;
use serde::Serialize;
use strum::IntoEnumIterator;
use tennis_core::{MatchConfig, MatchFormat, SetRules};

#[derive(Serialize)]
struct FormatEntry {
    name: &'static str,
    config: MatchConfig,
}

/// Run the formats command
pub fn run(json: bool) -> Result<()> {
    if json {
        let entries: Vec<FormatEntry> = MatchFormat::iter()
            .map(|format| FormatEntry {
                name: format.name(),
                config: format.config(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for format in MatchFormat::iter() {
        let rules = format.rules();
        println!(
            "{:<20} first to {} set{}",
            format.name().bold(),
            rules.target_sets,
            if rules.target_sets == 1 { "" } else { "s" }
        );
        if rules.target_sets > 1 {
            println!("{:<20} sets: {}", "", describe_set(&rules.regular));
        }
        println!("{:<20} final set: {}", "", describe_set(&rules.final_set));
    }
    Ok(())
}

fn describe_set(rules: &SetRules) -> String {
    let mut description = format!("to {} games", rules.target_games);
    match rules.tiebreak {
        Some(tiebreak) => description.push_str(&format!(
            ", tiebreak at {}-{} to {}",
            tiebreak.games, tiebreak.games, tiebreak.points
        )),
        None => description.push_str(", advantage"),
    }
    if rules.deciding_point {
        description.push_str(", deciding point at deuce");
    }
    description
}
