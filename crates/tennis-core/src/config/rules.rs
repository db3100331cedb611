use serde::{Deserialize, Serialize};

use super::defaults;
use crate::error::{Error, Result};

/// When a tiebreak is played and how long it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TiebreakRule {
    /// Games each side must hold before the tiebreak starts
    pub games: u32,
    /// Points needed to win the tiebreak
    pub points: u32,
}

impl TiebreakRule {
    pub fn new(games: u32, points: u32) -> Self {
        Self { games, points }
    }

    /// Build a tiebreak rule from optional parts.
    ///
    /// Both parts must be present (tiebreak played) or both absent (no tiebreak).
    /// `label` prefixes the field names in the error message.
    pub fn from_parts(
        games: Option<u32>,
        points: Option<u32>,
        label: &str,
    ) -> Result<Option<Self>> {
        match (games, points) {
            (Some(games), Some(points)) => Ok(Some(Self::new(games, points))),
            (None, None) => Ok(None),
            _ => Err(Error::InvalidConfiguration(format!(
                "{label}tiebreak_games and {label}tiebreak_points must both be set or both be unset"
            ))),
        }
    }
}

/// Rules for scoring a single set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SetRules {
    pub target_games: u32,
    /// Whether games in this set end on a single deciding point at deuce
    pub deciding_point: bool,
    pub tiebreak: Option<TiebreakRule>,
}

impl SetRules {
    pub fn new(
        target_games: u32,
        deciding_point: bool,
        tiebreak_games: Option<u32>,
        tiebreak_points: Option<u32>,
    ) -> Result<Self> {
        Ok(Self {
            target_games,
            deciding_point,
            tiebreak: TiebreakRule::from_parts(tiebreak_games, tiebreak_points, "")?,
        })
    }

    /// Rules for an advantage set, decided only by a two-game lead.
    pub fn advantage(target_games: u32, deciding_point: bool) -> Self {
        Self {
            target_games,
            deciding_point,
            tiebreak: None,
        }
    }

    pub fn tiebreak_games(&self) -> Option<u32> {
        self.tiebreak.map(|t| t.games)
    }

    pub fn tiebreak_points(&self) -> Option<u32> {
        self.tiebreak.map(|t| t.points)
    }
}

impl Default for SetRules {
    fn default() -> Self {
        Self {
            target_games: defaults::TARGET_GAMES,
            deciding_point: false,
            tiebreak: Some(TiebreakRule::new(
                defaults::TIEBREAK_GAMES,
                defaults::TIEBREAK_POINTS,
            )),
        }
    }
}

/// Flat match settings, as read from a config file.
///
/// Missing fields fall back to a best-of-three match with standard sets.
/// Call [`MatchConfig::validate`] to obtain usable [`MatchRules`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Sets a side needs to win the match
    pub target_sets: u32,
    pub target_games: u32,
    pub deciding_point: bool,
    pub tiebreak_games: Option<u32>,
    pub tiebreak_points: Option<u32>,
    pub final_set_target_games: u32,
    pub final_set_deciding_point: bool,
    pub final_set_tiebreak_games: Option<u32>,
    pub final_set_tiebreak_points: Option<u32>,
}

impl MatchConfig {
    pub fn validate(&self) -> Result<MatchRules> {
        if self.target_sets < 1 {
            return Err(Error::InvalidConfiguration(
                "target_sets must be at least 1".to_string(),
            ));
        }

        let regular = SetRules {
            target_games: self.target_games,
            deciding_point: self.deciding_point,
            tiebreak: TiebreakRule::from_parts(self.tiebreak_games, self.tiebreak_points, "")?,
        };
        let final_set = SetRules {
            target_games: self.final_set_target_games,
            deciding_point: self.final_set_deciding_point,
            tiebreak: TiebreakRule::from_parts(
                self.final_set_tiebreak_games,
                self.final_set_tiebreak_points,
                "final_set_",
            )?,
        };

        Ok(MatchRules {
            target_sets: self.target_sets,
            regular,
            final_set,
        })
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchRules::default().to_config()
    }
}

/// Validated rules for a whole match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchRules {
    pub target_sets: u32,
    /// Rules for every set except the deciding one
    pub regular: SetRules,
    /// Rules for the last possible set
    pub final_set: SetRules,
}

impl MatchRules {
    /// Zero-based index of the last set a match can reach, `None` when
    /// `target_sets` is zero.
    pub fn final_set_index(&self) -> Option<usize> {
        (self.target_sets as usize)
            .checked_sub(1)
            .map(|sets| 2 * sets)
    }

    /// Rules for the set played at `index` (zero-based).
    pub fn rules_for_set(&self, index: usize) -> SetRules {
        if Some(index) == self.final_set_index() {
            self.final_set
        } else {
            self.regular
        }
    }

    pub fn to_config(&self) -> MatchConfig {
        MatchConfig {
            target_sets: self.target_sets,
            target_games: self.regular.target_games,
            deciding_point: self.regular.deciding_point,
            tiebreak_games: self.regular.tiebreak_games(),
            tiebreak_points: self.regular.tiebreak_points(),
            final_set_target_games: self.final_set.target_games,
            final_set_deciding_point: self.final_set.deciding_point,
            final_set_tiebreak_games: self.final_set.tiebreak_games(),
            final_set_tiebreak_points: self.final_set.tiebreak_points(),
        }
    }
}

impl Default for MatchRules {
    fn default() -> Self {
        Self {
            target_sets: defaults::TARGET_SETS,
            regular: SetRules::default(),
            final_set: SetRules::default(),
        }
    }
}
