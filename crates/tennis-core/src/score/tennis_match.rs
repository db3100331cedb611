use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Set;
use super::display::{Flag, List, Maybe};
use super::scoreboard::Scoreboard;
use super::scoring::Scoring;
use crate::config::{MatchConfig, MatchRules};
use crate::error::{Error, Result, Stage};

/// A match: a run of sets between two players.
///
/// Scores are given from the point of view of the player who served first
/// in the first set (the match's first server). Every set has its own first
/// server; `first_server_served_first` records, per set, whether that is the
/// match's first server.
///
/// Serialized as its sets and flat config. Deserializing goes through
/// [`Match::with_sets`], so the derived fields are rebuilt and the config is
/// validated again.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "MatchSnapshot", into = "MatchSnapshot")]
pub struct Match {
    sets: Vec<Set>,
    rules: MatchRules,
    first_server_served_first: Vec<bool>,
    winner: Option<bool>,
}

#[derive(Serialize, Deserialize)]
struct MatchSnapshot {
    sets: Vec<Set>,
    #[serde(default)]
    config: MatchConfig,
}

impl From<Match> for MatchSnapshot {
    fn from(tennis_match: Match) -> Self {
        Self {
            config: tennis_match.config(),
            sets: tennis_match.sets,
        }
    }
}

impl TryFrom<MatchSnapshot> for Match {
    type Error = Error;

    fn try_from(snapshot: MatchSnapshot) -> Result<Self> {
        Match::with_sets(snapshot.sets, snapshot.config)
    }
}

/// Whether the first server of each set is the match's first server.
///
/// Service keeps rotating across sets, so a set with an odd number of games
/// hands the first serve of the next set to the other player.
fn served_first_per_set(sets: &[Set]) -> Vec<bool> {
    let mut served_first = Vec::with_capacity(sets.len());
    let mut current = true;
    for (i, set) in sets.iter().enumerate() {
        if i > 0 && sets[i - 1].games_played() % 2 == 1 {
            current = !current;
        }
        served_first.push(current);
    }
    served_first
}

impl Match {
    /// Start a match with the first set pending.
    pub fn new(config: MatchConfig) -> Result<Self> {
        Ok(Self::start(config.validate()?))
    }

    /// Start a match from already assembled rules, checking them first.
    pub fn from_rules(rules: MatchRules) -> Result<Self> {
        Self::new(rules.to_config())
    }

    fn start(rules: MatchRules) -> Self {
        Self::restore(vec![Set::new(rules.rules_for_set(0))], rules)
    }

    /// Restore a match from previously played sets.
    ///
    /// An empty list starts the match from scratch.
    pub fn with_sets(sets: Vec<Set>, config: MatchConfig) -> Result<Self> {
        let rules = config.validate()?;
        if sets.is_empty() {
            return Ok(Self::start(rules));
        }
        Ok(Self::restore(sets, rules))
    }

    fn restore(sets: Vec<Set>, rules: MatchRules) -> Self {
        let mut tennis_match = Self {
            first_server_served_first: served_first_per_set(&sets),
            sets,
            rules,
            winner: None,
        };
        tennis_match.winner = tennis_match.compute_winner();
        tennis_match
    }

    pub fn sets(&self) -> &[Set] {
        &self.sets
    }

    pub fn rules(&self) -> &MatchRules {
        &self.rules
    }

    pub fn config(&self) -> MatchConfig {
        self.rules.to_config()
    }

    pub fn first_server_served_first(&self) -> &[bool] {
        &self.first_server_served_first
    }

    /// The set played last (or being played).
    pub fn current_set(&self) -> &Set {
        &self.sets[self.sets.len() - 1]
    }

    /// `Some(true)` if the match's first server won, `Some(false)` if the
    /// first returner did.
    pub fn winner(&self) -> Option<bool> {
        self.winner
    }

    /// Sets won by the first server and first returner.
    pub fn sets_won(&self) -> (u32, u32) {
        self.sets
            .iter()
            .zip(&self.first_server_served_first)
            .fold((0, 0), |(first_server, first_returner), (set, &served_first)| {
                match set.winner().map(|winner| winner == served_first) {
                    Some(true) => (first_server + 1, first_returner),
                    Some(false) => (first_server, first_returner + 1),
                    None => (first_server, first_returner),
                }
            })
    }

    pub fn first_server_sets(&self) -> u32 {
        self.sets_won().0
    }

    pub fn first_returner_sets(&self) -> u32 {
        self.sets_won().1
    }

    fn compute_winner(&self) -> Option<bool> {
        let (first_server, first_returner) = self.sets_won();
        if first_server == self.rules.target_sets {
            Some(true)
        } else if first_returner == self.rules.target_sets {
            Some(false)
        } else {
            None
        }
    }

    /// Whether the match's first server serves in the set after the last one.
    fn next_served_first(&self) -> bool {
        let index = self.sets.len() - 1;
        self.first_server_served_first[index] != (self.sets[index].games_played() % 2 == 1)
    }

    fn open_next_set(&mut self) {
        let served_first = self.next_served_first();
        let rules = self.rules.rules_for_set(self.sets.len());
        debug!(
            "Starting set {} (first server serves first: {})",
            self.sets.len() + 1,
            served_first
        );
        self.sets.push(Set::new(rules));
        self.first_server_served_first.push(served_first);
    }

    /// Advance the match's score by a point won by the match's first server
    /// (`true`) or first returner.
    pub fn point(&mut self, first_server: bool) -> Result<Option<bool>> {
        if self.winner.is_some() {
            return Err(Error::AlreadyDecided(Stage::Match));
        }

        // Restored matches may end on a finished set
        if self.current_set().is_over() {
            self.open_next_set();
        }

        let index = self.sets.len() - 1;
        let served_first = self.first_server_served_first[index];
        let set_winner = self.sets[index].point(first_server == served_first)?;
        if set_winner.is_none() {
            return Ok(None);
        }

        let (first_server_sets, first_returner_sets) = self.sets_won();
        debug!(
            "Set {} complete: {}-{} in sets",
            index + 1,
            first_server_sets,
            first_returner_sets
        );

        self.winner = self.compute_winner();
        match self.winner {
            Some(first_server) => debug!(
                "Match won by first {} ({}-{})",
                if first_server { "server" } else { "returner" },
                first_server_sets,
                first_returner_sets
            ),
            None => self.open_next_set(),
        }

        Ok(self.winner)
    }

    /// Whether the match's first server serves next (`true`) or the first
    /// returner.
    pub fn first_server_to_serve(&self) -> Result<bool> {
        if self.winner.is_some() {
            return Err(Error::AlreadyDecided(Stage::Match));
        }

        let set = self.current_set();
        if set.is_over() {
            return Ok(self.next_served_first());
        }

        let index = self.sets.len() - 1;
        Ok(self.first_server_served_first[index] == set.first_server_to_serve()?)
    }

    /// Snapshot of the score from the match's first server's point of view.
    pub fn scoreboard(&self) -> Scoreboard {
        let orient = |served_first: bool, (first, second): (u32, u32)| {
            if served_first { (first, second) } else { (second, first) }
        };

        let sets = self
            .sets
            .iter()
            .zip(&self.first_server_served_first)
            .map(|(set, &served_first)| orient(served_first, set.games()))
            .collect();

        let (points, tiebreak) = if self.winner.is_some() {
            (None, false)
        } else {
            let index = self.sets.len() - 1;
            let set = &self.sets[index];
            let served_first = self.first_server_served_first[index];
            (
                set.current_points()
                    .map(|points| orient(served_first, points)),
                set.in_tiebreak(),
            )
        };

        Scoreboard {
            sets,
            sets_won: self.sets_won(),
            points,
            tiebreak,
            first_server_to_serve: self.first_server_to_serve().ok(),
            winner: self.winner,
        }
    }
}

impl Default for Match {
    fn default() -> Self {
        Self::start(MatchRules::default())
    }
}

impl Scoring for Match {
    fn point(&mut self, won: bool) -> Result<Option<bool>> {
        Match::point(self, won)
    }

    fn winner(&self) -> Option<bool> {
        self.winner
    }
}

impl std::fmt::Display for Match {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let config = self.config();
        write!(
            f,
            "Match(sets={}, target_sets={}, target_games={}, deciding_point={}, \
             tiebreak_games={}, tiebreak_points={}, final_set_target_games={}, \
             final_set_deciding_point={}, final_set_tiebreak_games={}, \
             final_set_tiebreak_points={})",
            List(&self.sets),
            config.target_sets,
            config.target_games,
            Flag(config.deciding_point),
            Maybe(config.tiebreak_games),
            Maybe(config.tiebreak_points),
            config.final_set_target_games,
            Flag(config.final_set_deciding_point),
            Maybe(config.final_set_tiebreak_games),
            Maybe(config.final_set_tiebreak_points),
        )
    }
}
