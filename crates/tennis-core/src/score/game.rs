use serde::{Deserialize, Serialize};
use tracing::trace;

use super::display::Flag;
use super::scoring::{Scoring, race_winner};
use crate::config::defaults::{DECIDING_POINT_LEAD, GAME_TARGET_POINTS, MIN_LEAD};
use crate::error::{Error, Result, Stage};

/// A single game between the player serving it and the player returning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Game {
    pub server_points: u32,
    pub returner_points: u32,
    /// At deuce, the next point wins the game
    #[serde(default)]
    pub deciding_point: bool,
}

impl Game {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a game at the given score.
    pub fn with_points(server_points: u32, returner_points: u32) -> Self {
        Self {
            server_points,
            returner_points,
            deciding_point: false,
        }
    }

    pub fn with_deciding_point(deciding_point: bool) -> Self {
        Self {
            deciding_point,
            ..Self::default()
        }
    }

    /// `Some(true)` if the server won, `Some(false)` if the returner won.
    pub fn winner(&self) -> Option<bool> {
        let lead = if self.deciding_point {
            DECIDING_POINT_LEAD
        } else {
            MIN_LEAD
        };
        race_winner(
            self.server_points,
            self.returner_points,
            GAME_TARGET_POINTS,
            lead,
        )
    }

    /// Advance the score by one point won by the server (`true`) or returner.
    pub fn point(&mut self, server: bool) -> Result<Option<bool>> {
        if self.winner().is_some() {
            return Err(Error::AlreadyDecided(Stage::Game));
        }

        if server {
            self.server_points = self.server_points.saturating_add(1);
        } else {
            self.returner_points = self.returner_points.saturating_add(1);
        }
        trace!(
            "Game point to {}: {}-{}",
            if server { "server" } else { "returner" },
            self.server_points,
            self.returner_points
        );

        Ok(self.winner())
    }
}

impl Scoring for Game {
    fn point(&mut self, won: bool) -> Result<Option<bool>> {
        Game::point(self, won)
    }

    fn winner(&self) -> Option<bool> {
        Game::winner(self)
    }
}

impl std::fmt::Display for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Game(server_points={}, returner_points={}",
            self.server_points, self.returner_points
        )?;
        if self.deciding_point {
            write!(f, ", deciding_point={}", Flag(true))?;
        }
        f.write_str(")")
    }
}
