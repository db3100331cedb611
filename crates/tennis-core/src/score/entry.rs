use serde::{Deserialize, Serialize};

use super::scoring::Scoring;
use super::{Game, Tiebreak};
use crate::error::Result;

/// One entry of a set: an ordinary game or the set's tiebreak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SetEntry {
    Game(Game),
    Tiebreak(Tiebreak),
}

/// Whether the set's first server serves the game at `index`.
///
/// Service alternates every game, so the first server serves the even ones.
pub(crate) fn first_server_serves(index: usize) -> bool {
    index % 2 == 0
}

impl SetEntry {
    pub fn is_tiebreak(&self) -> bool {
        matches!(self, Self::Tiebreak(_))
    }

    pub fn as_game(&self) -> Option<&Game> {
        match self {
            Self::Game(game) => Some(game),
            Self::Tiebreak(_) => None,
        }
    }

    pub fn as_tiebreak(&self) -> Option<&Tiebreak> {
        match self {
            Self::Tiebreak(tiebreak) => Some(tiebreak),
            Self::Game(_) => None,
        }
    }

    /// Winner of this entry, translated to the set's first server when it
    /// sits at `index` in the set.
    pub fn first_server_won(&self, index: usize) -> Option<bool> {
        match self {
            Self::Game(game) => game
                .winner()
                .map(|server| server == first_server_serves(index)),
            Self::Tiebreak(tiebreak) => tiebreak.winner(),
        }
    }

    /// Points of the set's first server and first returner in this entry.
    pub fn first_server_points(&self, index: usize) -> (u32, u32) {
        match self {
            Self::Game(game) if first_server_serves(index) => {
                (game.server_points, game.returner_points)
            }
            Self::Game(game) => (game.returner_points, game.server_points),
            Self::Tiebreak(tiebreak) => (
                tiebreak.first_server_points,
                tiebreak.first_returner_points,
            ),
        }
    }

    /// Record a point won by the set's first server (`true`) or first returner,
    /// for an entry at `index`. Returns the entry-local winner.
    pub(crate) fn point_at(&mut self, index: usize, first_server: bool) -> Result<Option<bool>> {
        match self {
            Self::Game(game) => game.point(first_server == first_server_serves(index)),
            Self::Tiebreak(tiebreak) => tiebreak.point(first_server),
        }
    }
}

impl Scoring for SetEntry {
    fn point(&mut self, won: bool) -> Result<Option<bool>> {
        match self {
            Self::Game(game) => game.point(won),
            Self::Tiebreak(tiebreak) => tiebreak.point(won),
        }
    }

    fn winner(&self) -> Option<bool> {
        match self {
            Self::Game(game) => game.winner(),
            Self::Tiebreak(tiebreak) => tiebreak.winner(),
        }
    }
}

impl From<Game> for SetEntry {
    fn from(game: Game) -> Self {
        Self::Game(game)
    }
}

impl From<Tiebreak> for SetEntry {
    fn from(tiebreak: Tiebreak) -> Self {
        Self::Tiebreak(tiebreak)
    }
}

impl std::fmt::Display for SetEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Game(game) => write!(f, "{}", game),
            Self::Tiebreak(tiebreak) => write!(f, "{}", tiebreak),
        }
    }
}
