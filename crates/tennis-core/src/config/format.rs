use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString, IntoStaticStr};

use super::{MatchConfig, MatchRules, SetRules, TiebreakRule};

/// Named match formats.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum MatchFormat {
    /// Two sets to win, tiebreak at 6-6 in every set
    #[default]
    BestOfThree,
    /// Three sets to win, tiebreak at 6-6 in every set
    BestOfFive,
    /// Best of five with an advantage final set
    AdvantageFinalSet,
    /// Best of five with a ten-point tiebreak at 6-6 in the final set
    GrandSlam,
    /// Short sets to four games with deciding points at deuce
    #[strum(serialize = "fast4")]
    #[serde(rename = "fast4")]
    Fast4,
    /// A single standard set
    SingleSet,
}

impl MatchFormat {
    pub fn name(&self) -> &'static str {
        self.into()
    }

    pub fn rules(&self) -> MatchRules {
        let standard = SetRules::default();
        match self {
            Self::BestOfThree => MatchRules::default(),
            Self::BestOfFive => MatchRules {
                target_sets: 3,
                regular: standard,
                final_set: standard,
            },
            Self::AdvantageFinalSet => MatchRules {
                target_sets: 3,
                regular: standard,
                final_set: SetRules::advantage(standard.target_games, false),
            },
            Self::GrandSlam => MatchRules {
                target_sets: 3,
                regular: standard,
                final_set: SetRules {
                    tiebreak: Some(TiebreakRule::new(6, 10)),
                    ..standard
                },
            },
            Self::Fast4 => {
                let short = SetRules {
                    target_games: 4,
                    deciding_point: true,
                    tiebreak: Some(TiebreakRule::new(3, 5)),
                };
                MatchRules {
                    target_sets: 2,
                    regular: short,
                    final_set: short,
                }
            }
            Self::SingleSet => MatchRules {
                target_sets: 1,
                regular: standard,
                final_set: standard,
            },
        }
    }

    pub fn config(&self) -> MatchConfig {
        self.rules().to_config()
    }
}

impl std::fmt::Display for MatchFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
