//! Rule configuration for matches and sets.
//!
//! This module contains the types describing how a match is scored:
//! - `MatchConfig` - flat, deserializable match settings
//! - `MatchRules` / `SetRules` / `TiebreakRule` - validated rule bundles
//! - `MatchFormat` - named presets (best of three, Fast4, ...)
//! - Scoring constants

mod format;
mod rules;

pub use format::*;
pub use rules::*;

/// Constants of the standard scoring rules.
pub mod defaults {
    /// Points a side needs to win an ordinary game.
    pub const GAME_TARGET_POINTS: u32 = 4;

    /// Lead required to close out a game, tiebreak or set.
    pub const MIN_LEAD: u32 = 2;

    /// Lead required to win a game played with a deciding point at deuce.
    pub const DECIDING_POINT_LEAD: u32 = 1;

    /// Sets a side needs to win a best-of-three match.
    pub const TARGET_SETS: u32 = 2;

    /// Games a side needs to win a standard set.
    pub const TARGET_GAMES: u32 = 6;

    /// Games each side must hold before a standard tiebreak is played.
    pub const TIEBREAK_GAMES: u32 = 6;

    /// Points needed to win a standard tiebreak.
    pub const TIEBREAK_POINTS: u32 = 7;
}
