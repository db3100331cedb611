use serde::{Deserialize, Serialize};
use tracing::debug;

use super::display::{Flag, List, Maybe};
use super::entry::first_server_serves;
use super::scoring::{Scoring, race_winner};
use super::{Game, SetEntry, Tiebreak};
use crate::config::SetRules;
use crate::config::defaults::MIN_LEAD;
use crate::error::{Error, Result, Stage};

/// A set: a run of games, possibly closed by a tiebreak.
///
/// Game tallies are always derived from the entries, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Set {
    entries: Vec<SetEntry>,
    rules: SetRules,
}

impl Set {
    /// Start a set with one game pending.
    pub fn new(rules: SetRules) -> Self {
        Self {
            entries: vec![SetEntry::Game(Game::with_deciding_point(
                rules.deciding_point,
            ))],
            rules,
        }
    }

    /// Restore a set from previously played entries.
    pub fn with_entries(entries: Vec<SetEntry>, rules: SetRules) -> Self {
        Self { entries, rules }
    }

    pub fn entries(&self) -> &[SetEntry] {
        &self.entries
    }

    pub fn rules(&self) -> &SetRules {
        &self.rules
    }

    /// Number of entries played or in progress, tiebreak included.
    pub fn games_played(&self) -> usize {
        self.entries.len()
    }

    /// Game tallies of the first server and first returner.
    pub fn games(&self) -> (u32, u32) {
        self.entries
            .iter()
            .enumerate()
            .fold((0, 0), |(first_server, first_returner), (i, entry)| {
                match entry.first_server_won(i) {
                    Some(true) => (first_server + 1, first_returner),
                    Some(false) => (first_server, first_returner + 1),
                    None => (first_server, first_returner),
                }
            })
    }

    pub fn first_server_games(&self) -> u32 {
        self.games().0
    }

    pub fn first_returner_games(&self) -> u32 {
        self.games().1
    }

    /// `Some(true)` if the first server won the set, `Some(false)` if the
    /// first returner did.
    ///
    /// A finished tiebreak decides the set on its own.
    pub fn winner(&self) -> Option<bool> {
        if let Some(SetEntry::Tiebreak(tiebreak)) = self.entries.last() {
            if let Some(winner) = tiebreak.winner() {
                return Some(winner);
            }
        }

        let (first_server, first_returner) = self.games();
        race_winner(
            first_server,
            first_returner,
            self.rules.target_games,
            MIN_LEAD,
        )
    }

    /// The entry currently being played, if any.
    pub fn current(&self) -> Option<&SetEntry> {
        self.entries.last().filter(|entry| !entry.is_over())
    }

    /// Whether the entry in play is the tiebreak.
    pub fn in_tiebreak(&self) -> bool {
        self.current().is_some_and(SetEntry::is_tiebreak)
    }

    /// Points of the first server and first returner in the entry in play.
    pub fn current_points(&self) -> Option<(u32, u32)> {
        let index = self.entries.len().checked_sub(1)?;
        self.current()
            .map(|entry| entry.first_server_points(index))
    }

    /// Index the next point will be played at.
    fn next_index(&self) -> usize {
        match self.current() {
            Some(_) => self.entries.len() - 1,
            None => self.entries.len(),
        }
    }

    fn next_entry(&self) -> SetEntry {
        let (first_server, first_returner) = self.games();
        match self.rules.tiebreak {
            Some(rule) if first_server == rule.games && first_returner == rule.games => {
                debug!("Tiebreak at {}-{}", first_server, first_returner);
                SetEntry::Tiebreak(Tiebreak::new(rule.points))
            }
            _ => SetEntry::Game(Game::with_deciding_point(self.rules.deciding_point)),
        }
    }

    /// Advance the set's score by a point won by the first server (`true`)
    /// or the first returner.
    pub fn point(&mut self, first_server: bool) -> Result<Option<bool>> {
        if self.winner().is_some() {
            return Err(Error::AlreadyDecided(Stage::Set));
        }

        // Restored sets may end on a finished entry
        if self.current().is_none() {
            let next = self.next_entry();
            self.entries.push(next);
        }

        let index = self.entries.len() - 1;
        let entry_winner = self.entries[index].point_at(index, first_server)?;
        if entry_winner.is_none() {
            return Ok(None);
        }

        let (first_server_games, first_returner_games) = self.games();
        debug!(
            "Game {} complete: {}-{}",
            index + 1,
            first_server_games,
            first_returner_games
        );

        let winner = self.winner();
        match winner {
            Some(first_server) => debug!(
                "Set won by first {}",
                if first_server { "server" } else { "returner" }
            ),
            None => {
                let next = self.next_entry();
                self.entries.push(next);
            }
        }

        Ok(winner)
    }

    /// Whether the first server serves next (`true`) or the first returner.
    ///
    /// During a tiebreak this names the player who opened it.
    pub fn first_server_to_serve(&self) -> Result<bool> {
        if self.winner().is_some() {
            return Err(Error::AlreadyDecided(Stage::Set));
        }

        Ok(first_server_serves(self.next_index()))
    }
}

impl Default for Set {
    fn default() -> Self {
        Self::new(SetRules::default())
    }
}

impl Scoring for Set {
    fn point(&mut self, won: bool) -> Result<Option<bool>> {
        Set::point(self, won)
    }

    fn winner(&self) -> Option<bool> {
        Set::winner(self)
    }
}

impl std::fmt::Display for Set {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Set(games={}, target_games={}, deciding_point={}, tiebreak_games={}, tiebreak_points={})",
            List(&self.entries),
            self.rules.target_games,
            Flag(self.rules.deciding_point),
            Maybe(self.rules.tiebreak_games()),
            Maybe(self.rules.tiebreak_points()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn games(scores: &[(u32, u32)]) -> Vec<SetEntry> {
        scores
            .iter()
            .map(|&(server, returner)| SetEntry::Game(Game::with_points(server, returner)))
            .collect()
    }

    fn held(count: usize) -> Vec<SetEntry> {
        vec![SetEntry::Game(Game::with_points(4, 0)); count]
    }

    fn set(entries: Vec<SetEntry>) -> Set {
        Set::with_entries(entries, SetRules::default())
    }

    fn advantage_set(entries: Vec<SetEntry>) -> Set {
        Set::with_entries(entries, SetRules::advantage(6, false))
    }

    fn with_tiebreak(mut entries: Vec<SetEntry>, tiebreak: Tiebreak) -> Vec<SetEntry> {
        entries.push(SetEntry::Tiebreak(tiebreak));
        entries
    }

    #[test]
    fn test_new_set() {
        let set = Set::default();
        assert_eq!(set.entries(), &[SetEntry::Game(Game::new())]);
        assert_eq!(set.rules(), &SetRules::default());
        assert_eq!(set.winner(), None);
    }

    #[test]
    fn test_first_server_games() {
        assert_eq!(set(vec![]).first_server_games(), 0);
        assert_eq!(Set::default().first_server_games(), 0);
        assert_eq!(set(games(&[(0, 4)])).first_server_games(), 0);
        assert_eq!(set(games(&[(4, 0)])).first_server_games(), 1);

        assert_eq!(set(games(&[(0, 4), (0, 0)])).first_server_games(), 0);
        assert_eq!(set(games(&[(0, 4), (0, 4)])).first_server_games(), 1);
        assert_eq!(set(games(&[(0, 4), (4, 0)])).first_server_games(), 0);

        assert_eq!(
            set(with_tiebreak(games(&[(0, 4), (4, 0)]), Tiebreak::new(7))).first_server_games(),
            0
        );
        assert_eq!(
            set(with_tiebreak(
                games(&[(0, 4), (4, 0)]),
                Tiebreak::with_points(0, 7, 7)
            ))
            .first_server_games(),
            0
        );
        assert_eq!(
            set(with_tiebreak(
                games(&[(0, 4), (4, 0)]),
                Tiebreak::with_points(7, 0, 7)
            ))
            .first_server_games(),
            1
        );

        assert_eq!(set(games(&[(4, 0), (0, 0)])).first_server_games(), 1);
        assert_eq!(set(games(&[(4, 0), (0, 4)])).first_server_games(), 2);
        assert_eq!(set(games(&[(4, 0), (4, 0)])).first_server_games(), 1);
        assert_eq!(
            set(with_tiebreak(
                games(&[(4, 0), (4, 0)]),
                Tiebreak::with_points(7, 0, 7)
            ))
            .first_server_games(),
            2
        );
    }

    #[test]
    fn test_first_returner_games() {
        assert_eq!(set(vec![]).first_returner_games(), 0);
        assert_eq!(Set::default().first_returner_games(), 0);
        assert_eq!(set(games(&[(0, 4)])).first_returner_games(), 1);
        assert_eq!(set(games(&[(4, 0)])).first_returner_games(), 0);

        assert_eq!(set(games(&[(0, 4), (0, 0)])).first_returner_games(), 1);
        assert_eq!(set(games(&[(0, 4), (0, 4)])).first_returner_games(), 1);
        assert_eq!(set(games(&[(0, 4), (4, 0)])).first_returner_games(), 2);

        assert_eq!(
            set(with_tiebreak(
                games(&[(0, 4), (4, 0)]),
                Tiebreak::with_points(0, 7, 7)
            ))
            .first_returner_games(),
            3
        );
        assert_eq!(
            set(with_tiebreak(
                games(&[(4, 0), (4, 0)]),
                Tiebreak::with_points(0, 7, 7)
            ))
            .first_returner_games(),
            2
        );
        assert_eq!(
            set(with_tiebreak(
                games(&[(4, 0), (4, 0)]),
                Tiebreak::with_points(7, 0, 7)
            ))
            .first_returner_games(),
            1
        );
    }

    #[test]
    fn test_winner_with_tiebreak() {
        assert_eq!(set(with_tiebreak(held(12), Tiebreak::new(7))).winner(), None);
        assert_eq!(
            set(with_tiebreak(held(12), Tiebreak::with_points(7, 0, 7))).winner(),
            Some(true)
        );
        assert_eq!(
            set(with_tiebreak(held(12), Tiebreak::with_points(0, 7, 7))).winner(),
            Some(false)
        );
    }

    #[test]
    fn test_winner_advantage_set() {
        let pending = |mut entries: Vec<SetEntry>| {
            entries.push(SetEntry::Game(Game::new()));
            advantage_set(entries)
        };
        assert_eq!(pending(held(10)).winner(), None);
        assert_eq!(pending(held(11)).winner(), None);
        assert_eq!(pending(held(12)).winner(), None);
        assert_eq!(pending(held(13)).winner(), None);

        let mut entries = held(13);
        entries.extend(games(&[(0, 4)]));
        assert_eq!(advantage_set(entries).winner(), Some(true));

        let mut entries = held(12);
        entries.extend(games(&[(0, 4)]));
        assert_eq!(pending(entries.clone()).winner(), None);

        entries.extend(games(&[(4, 0)]));
        assert_eq!(advantage_set(entries).winner(), Some(false));
    }

    #[test]
    fn test_point_after_set_over() {
        let mut set = set(games(&[(4, 0), (0, 4)]).repeat(3));
        let before = set.clone();
        assert_eq!(set.point(true), Err(Error::AlreadyDecided(Stage::Set)));
        assert_eq!(set, before);
    }

    #[test]
    fn test_first_server_wins_every_point() {
        let mut set = Set::default();
        let mut expected = Vec::new();
        for game in 0..6 {
            let server = first_server_serves(game);
            for point in 1..=4 {
                let result = set.point(true).unwrap();
                if point < 4 {
                    let score = if server { (point, 0) } else { (0, point) };
                    let mut entries = expected.clone();
                    entries.push(score);
                    assert_eq!(result, None);
                    assert_eq!(set.entries(), games(&entries).as_slice());
                }
            }
            expected.push(if server { (4, 0) } else { (0, 4) });
        }
        assert_eq!(set.winner(), Some(true));
        assert_eq!(set.entries(), games(&expected).as_slice());
    }

    #[test]
    fn test_first_returner_wins_every_point() {
        let mut set = Set::default();
        let mut result = None;
        for _ in 0..24 {
            result = set.point(false).unwrap();
        }
        assert_eq!(result, Some(false));
        assert_eq!(
            set.entries(),
            games(&[(0, 4), (4, 0), (0, 4), (4, 0), (0, 4), (4, 0)]).as_slice()
        );
    }

    #[test]
    fn test_tiebreak_starts_at_six_all() {
        let mut entries = held(11);
        entries.extend(games(&[(3, 0)]));
        let mut set = set(entries);

        assert_eq!(set.point(false), Ok(None));
        assert_eq!(
            set.entries(),
            with_tiebreak(held(12), Tiebreak::new(7)).as_slice()
        );
        assert!(set.in_tiebreak());

        for _ in 0..6 {
            assert_eq!(set.point(true), Ok(None));
        }
        assert_eq!(set.point(true), Ok(Some(true)));
        assert_eq!(set.games(), (7, 6));
    }

    #[test]
    fn test_no_tiebreak_in_advantage_set() {
        let mut entries = held(11);
        entries.extend(games(&[(3, 0)]));
        let mut set = advantage_set(entries);

        assert_eq!(set.point(false), Ok(None));
        assert_eq!(set.entries().len(), 13);
        assert_eq!(set.entries()[12], SetEntry::Game(Game::new()));
    }

    #[test]
    fn test_deciding_point_reaches_new_games() {
        let rules = SetRules::new(6, true, Some(6), Some(7)).unwrap();
        let mut set = Set::new(rules);
        for _ in 0..4 {
            set.point(true).unwrap();
        }
        assert_eq!(
            set.entries()[1],
            SetEntry::Game(Game::with_deciding_point(true))
        );
    }

    #[test]
    fn test_point_on_empty_set_opens_game() {
        let mut set = set(vec![]);
        assert_eq!(set.point(true), Ok(None));
        assert_eq!(set.entries(), games(&[(1, 0)]).as_slice());
    }

    #[test]
    fn test_point_after_restored_finished_game() {
        let mut set = set(games(&[(4, 0)]));
        assert_eq!(set.first_server_to_serve(), Ok(false));
        assert_eq!(set.point(true), Ok(None));
        assert_eq!(set.entries(), games(&[(4, 0), (0, 1)]).as_slice());
    }

    #[test]
    fn test_point_after_restored_game_reaching_tiebreak() {
        let mut set = set(held(12));
        assert_eq!(set.games(), (6, 6));
        assert!(!set.in_tiebreak());
        assert_eq!(set.first_server_to_serve(), Ok(true));

        assert_eq!(set.point(false), Ok(None));
        assert!(set.in_tiebreak());
        assert_eq!(set.entries().len(), 13);
        assert_eq!(
            set.entries().last(),
            Some(&SetEntry::Tiebreak(Tiebreak::with_points(0, 1, 7)))
        );
    }

    #[test]
    fn test_first_server_to_serve() {
        assert_eq!(Set::default().first_server_to_serve(), Ok(true));
        assert_eq!(set(games(&[(4, 0), (0, 0)])).first_server_to_serve(), Ok(false));
        assert_eq!(
            set(games(&[(4, 0), (0, 4), (2, 1)])).first_server_to_serve(),
            Ok(true)
        );
        assert_eq!(
            set(with_tiebreak(held(12), Tiebreak::new(7))).first_server_to_serve(),
            Ok(true)
        );
        assert_eq!(
            set(held(12).into_iter().chain(games(&[(0, 4)])).collect())
                .first_server_to_serve(),
            Ok(false)
        );
        assert_eq!(
            set(games(&[(4, 0), (0, 4)]).repeat(3)).first_server_to_serve(),
            Err(Error::AlreadyDecided(Stage::Set))
        );
    }

    #[test]
    fn test_current_points() {
        assert_eq!(set(games(&[(4, 0), (1, 2)])).current_points(), Some((2, 1)));
        assert_eq!(set(vec![]).current_points(), None);
        assert_eq!(set(games(&[(4, 0)])).current_points(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Set::default().to_string(),
            "Set(games=[Game(server_points=0, returner_points=0)], target_games=6, \
             deciding_point=False, tiebreak_games=6, tiebreak_points=7)"
        );
        let set = Set::with_entries(
            with_tiebreak(games(&[(4, 1)]), Tiebreak::new(10)),
            SetRules::advantage(6, true),
        );
        assert_eq!(
            set.to_string(),
            "Set(games=[Game(server_points=4, returner_points=1), \
             Tiebreak(first_server_points=0, first_returner_points=0, target_points=10)], \
             target_games=6, deciding_point=True, tiebreak_games=None, tiebreak_points=None)"
        );
    }
}
