pub mod config;
pub mod error;
pub mod score;

pub use config::{MatchConfig, MatchFormat, MatchRules, SetRules, TiebreakRule};
pub use error::{Error, Result, Stage};
pub use score::{Game, Match, Scoreboard, Scoring, Set, SetEntry, Tiebreak};
