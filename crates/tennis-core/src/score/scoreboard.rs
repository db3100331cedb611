use serde::{Deserialize, Serialize};

/// Numeric summary of a match, oriented to the match's first server.
///
/// Every pair is `(first server, first returner)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    /// Games won in each set so far
    pub sets: Vec<(u32, u32)>,
    pub sets_won: (u32, u32),
    /// Points in the game or tiebreak in play
    pub points: Option<(u32, u32)>,
    /// Whether the points above belong to a tiebreak
    pub tiebreak: bool,
    /// `None` once the match is over
    pub first_server_to_serve: Option<bool>,
    pub winner: Option<bool>,
}

impl Scoreboard {
    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// Games won in the set being played, or the last set once the match is over.
    pub fn current_set(&self) -> (u32, u32) {
        self.sets.last().copied().unwrap_or_default()
    }
}
