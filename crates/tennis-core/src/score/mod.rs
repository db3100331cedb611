//! Scoring state machines.
//!
//! Four nested levels, each advanced one point at a time:
//! - `Game` - a single service game
//! - `Tiebreak` - the tiebreak that may close a set
//! - `Set` - games (and at most one tiebreak), as `SetEntry` values
//! - `Match` - sets, with service carried across set boundaries

mod display;
mod entry;
mod game;
mod scoreboard;
mod scoring;
mod set;
mod tennis_match;
mod tiebreak;

pub use entry::*;
pub use game::*;
pub use scoreboard::*;
pub use scoring::Scoring;
pub use set::*;
pub use tennis_match::*;
pub use tiebreak::*;
