use serde::{Deserialize, Serialize};
use tracing::trace;

use super::scoring::{Scoring, race_winner};
use crate::config::defaults::{MIN_LEAD, TIEBREAK_POINTS};
use crate::error::{Error, Result, Stage};

/// Tiebreak played at the end of a set.
///
/// Points are credited to the set's first server and first returner,
/// whoever happens to be serving them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tiebreak {
    pub first_server_points: u32,
    pub first_returner_points: u32,
    pub target_points: u32,
}

impl Tiebreak {
    pub fn new(target_points: u32) -> Self {
        Self::with_points(0, 0, target_points)
    }

    pub fn with_points(
        first_server_points: u32,
        first_returner_points: u32,
        target_points: u32,
    ) -> Self {
        Self {
            first_server_points,
            first_returner_points,
            target_points,
        }
    }

    /// `Some(true)` if the first server won, `Some(false)` if the first returner won.
    pub fn winner(&self) -> Option<bool> {
        race_winner(
            self.first_server_points,
            self.first_returner_points,
            self.target_points,
            MIN_LEAD,
        )
    }

    pub fn point(&mut self, first_server: bool) -> Result<Option<bool>> {
        if self.winner().is_some() {
            return Err(Error::AlreadyDecided(Stage::Tiebreak));
        }

        if first_server {
            self.first_server_points = self.first_server_points.saturating_add(1);
        } else {
            self.first_returner_points = self.first_returner_points.saturating_add(1);
        }
        trace!(
            "Tiebreak point: {}-{}",
            self.first_server_points, self.first_returner_points
        );

        Ok(self.winner())
    }

    /// Total points played so far.
    pub fn points_played(&self) -> u32 {
        self.first_server_points.saturating_add(self.first_returner_points)
    }
}

impl Default for Tiebreak {
    fn default() -> Self {
        Self::new(TIEBREAK_POINTS)
    }
}

impl Scoring for Tiebreak {
    fn point(&mut self, won: bool) -> Result<Option<bool>> {
        Tiebreak::point(self, won)
    }

    fn winner(&self) -> Option<bool> {
        Tiebreak::winner(self)
    }
}

impl std::fmt::Display for Tiebreak {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Tiebreak(first_server_points={}, first_returner_points={}, target_points={})",
            self.first_server_points, self.first_returner_points, self.target_points
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tiebreak() {
        assert_eq!(Tiebreak::default(), Tiebreak::with_points(0, 0, 7));
    }

    #[test]
    fn test_winner() {
        assert_eq!(Tiebreak::with_points(6, 0, 7).winner(), None);
        assert_eq!(Tiebreak::with_points(7, 0, 7).winner(), Some(true));
        assert_eq!(Tiebreak::with_points(5, 7, 7).winner(), Some(false));
        assert_eq!(Tiebreak::with_points(7, 6, 7).winner(), None);
        assert_eq!(Tiebreak::with_points(12, 10, 7).winner(), Some(true));
        assert_eq!(Tiebreak::with_points(7, 0, 10).winner(), None);
        assert_eq!(Tiebreak::with_points(10, 3, 10).winner(), Some(true));
    }

    #[test]
    fn test_point() {
        let mut tiebreak = Tiebreak::with_points(6, 6, 7);
        assert_eq!(tiebreak.point(false), Ok(None));
        assert_eq!(tiebreak.point(true), Ok(None));
        assert_eq!(tiebreak.point(false), Ok(None));
        assert_eq!(tiebreak.point(false), Ok(Some(false)));
        assert_eq!(tiebreak, Tiebreak::with_points(7, 9, 7));
        assert_eq!(tiebreak.points_played(), 16);
    }

    #[test]
    fn test_point_after_tiebreak_over() {
        let mut tiebreak = Tiebreak::with_points(7, 0, 7);
        assert_eq!(
            tiebreak.point(false),
            Err(Error::AlreadyDecided(Stage::Tiebreak))
        );
        assert_eq!(tiebreak, Tiebreak::with_points(7, 0, 7));
    }

    #[test]
    fn test_restored_near_max_points() {
        let mut tiebreak = Tiebreak::with_points(u32::MAX, u32::MAX - 1, 7);
        assert_eq!(tiebreak.winner(), None);
        assert_eq!(tiebreak.points_played(), u32::MAX);
        assert_eq!(tiebreak.point(false), Ok(None));
        assert_eq!(tiebreak, Tiebreak::with_points(u32::MAX, u32::MAX, 7));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Tiebreak::with_points(3, 4, 7).to_string(),
            "Tiebreak(first_server_points=3, first_returner_points=4, target_points=7)"
        );
    }
}
