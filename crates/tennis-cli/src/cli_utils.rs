//! Common CLI utility functions shared across commands.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use tennis_core::{MatchConfig, MatchFormat};
use tracing::debug;

/// Parse point notation into match-relative outcomes.
///
/// `A` is a point won by the match's first server, `B` one won by the first
/// returner (either case). Whitespace and the separators `,` `.` `|` are ignored.
pub fn parse_points(input: &str) -> Result<Vec<bool>> {
    let mut points = Vec::with_capacity(input.len());
    for (i, c) in input.chars().enumerate() {
        match c {
            'A' | 'a' => points.push(true),
            'B' | 'b' => points.push(false),
            ',' | '.' | '|' => {}
            c if c.is_whitespace() => {}
            c => bail!("Invalid point '{}' at position {} (expected A or B)", c, i + 1),
        }
    }
    Ok(points)
}

/// Read the points argument, taking stdin for `-`.
pub fn read_points(arg: &str) -> Result<String> {
    if arg != "-" {
        return Ok(arg.to_string());
    }
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read points from stdin")?;
    Ok(input)
}

/// Match rules as written in a TOML config file.
///
/// Rules start from `format` (best of three when absent) and every other key
/// overrides one field. TOML has no null, so `tiebreak = false` and
/// `final_set_tiebreak = false` switch tiebreaks off.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub format: Option<MatchFormat>,
    pub target_sets: Option<u32>,
    pub target_games: Option<u32>,
    pub deciding_point: Option<bool>,
    pub tiebreak: Option<bool>,
    pub tiebreak_games: Option<u32>,
    pub tiebreak_points: Option<u32>,
    pub final_set_target_games: Option<u32>,
    pub final_set_deciding_point: Option<bool>,
    pub final_set_tiebreak: Option<bool>,
    pub final_set_tiebreak_games: Option<u32>,
    pub final_set_tiebreak_points: Option<u32>,
}

impl ConfigFile {
    pub fn into_config(self) -> MatchConfig {
        let mut config = self.format.unwrap_or_default().config();

        if let Some(target_sets) = self.target_sets {
            config.target_sets = target_sets;
        }
        if let Some(target_games) = self.target_games {
            config.target_games = target_games;
        }
        if let Some(deciding_point) = self.deciding_point {
            config.deciding_point = deciding_point;
        }
        if self.tiebreak_games.is_some() {
            config.tiebreak_games = self.tiebreak_games;
        }
        if self.tiebreak_points.is_some() {
            config.tiebreak_points = self.tiebreak_points;
        }
        if self.tiebreak == Some(false) {
            config.tiebreak_games = None;
            config.tiebreak_points = None;
        }

        if let Some(target_games) = self.final_set_target_games {
            config.final_set_target_games = target_games;
        }
        if let Some(deciding_point) = self.final_set_deciding_point {
            config.final_set_deciding_point = deciding_point;
        }
        if self.final_set_tiebreak_games.is_some() {
            config.final_set_tiebreak_games = self.final_set_tiebreak_games;
        }
        if self.final_set_tiebreak_points.is_some() {
            config.final_set_tiebreak_points = self.final_set_tiebreak_points;
        }
        if self.final_set_tiebreak == Some(false) {
            config.final_set_tiebreak_games = None;
            config.final_set_tiebreak_points = None;
        }

        config
    }
}

/// Load match rules from a TOML file.
pub fn load_config(path: &Path) -> Result<MatchConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let file: ConfigFile = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    let config = file.into_config();
    debug!("Loaded match config from {}: {:?}", path.display(), config);
    Ok(config)
}
