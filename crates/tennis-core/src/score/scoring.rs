use crate::error::Result;

/// Point-by-point scoring shared by every level of a match.
///
/// `true` means the server for a [`Game`](super::Game), and the first server
/// for a [`Tiebreak`](super::Tiebreak), [`Set`](super::Set) or
/// [`Match`](super::Match).
pub trait Scoring {
    /// Record one point and return the winner, if the point decided it.
    ///
    /// Fails with [`AlreadyDecided`](crate::Error::AlreadyDecided) without
    /// touching any state when a winner already exists.
    fn point(&mut self, won: bool) -> Result<Option<bool>>;

    fn winner(&self) -> Option<bool>;

    fn is_over(&self) -> bool {
        self.winner().is_some()
    }
}

/// Winner of a race to `target` points that must be won by `lead`.
pub(crate) fn race_winner(first: u32, second: u32, target: u32, lead: u32) -> Option<bool> {
    if first >= target && first.checked_sub(second).is_some_and(|ahead| ahead >= lead) {
        return Some(true);
    }
    if second >= target && second.checked_sub(first).is_some_and(|ahead| ahead >= lead) {
        return Some(false);
    }
    None
}
