use serde::Serialize;

use crate::ActionError;

/// Session statistics tracking how pieces moved through the queue and the
/// reserve stack.
///
/// Only successful actions are counted in the per-action counters; every
/// rejected action increments [`Self::rejected_actions`] instead.
///
/// # Example
///
/// ```
/// use piece_reserve_engine::GameController;
///
/// let mut controller = GameController::new();
/// controller.play().unwrap();
/// controller.use_reserved().unwrap_err();
///
/// assert_eq!(controller.stats().played_pieces(), 1);
/// assert_eq!(controller.stats().rejected_actions(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GameStats {
    played_pieces: usize,
    reserved_pieces: usize,
    used_pieces: usize,
    front_swaps: usize,
    multiple_swaps: usize,
    rejected_actions: usize,
}

impl GameStats {
    /// Creates a new statistics tracker with all counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            played_pieces: 0,
            reserved_pieces: 0,
            used_pieces: 0,
            front_swaps: 0,
            multiple_swaps: 0,
            rejected_actions: 0,
        }
    }

    /// Returns the number of pieces played from the queue front.
    #[must_use]
    pub const fn played_pieces(&self) -> usize {
        self.played_pieces
    }

    /// Returns the number of pieces moved from the queue into the reserve stack.
    #[must_use]
    pub const fn reserved_pieces(&self) -> usize {
        self.reserved_pieces
    }

    /// Returns the number of reserved pieces taken back out of the stack.
    #[must_use]
    pub const fn used_pieces(&self) -> usize {
        self.used_pieces
    }

    #[must_use]
    pub const fn front_swaps(&self) -> usize {
        self.front_swaps
    }

    #[must_use]
    pub const fn multiple_swaps(&self) -> usize {
        self.multiple_swaps
    }

    #[must_use]
    pub const fn rejected_actions(&self) -> usize {
        self.rejected_actions
    }

    pub(crate) const fn record_play(&mut self) {
        self.played_pieces += 1;
    }

    pub(crate) const fn record_reserve(&mut self) {
        self.reserved_pieces += 1;
    }

    pub(crate) const fn record_use(&mut self) {
        self.used_pieces += 1;
    }

    pub(crate) const fn record_front_swap(&mut self) {
        self.front_swaps += 1;
    }

    pub(crate) const fn record_multiple_swap(&mut self) {
        self.multiple_swaps += 1;
    }

    pub(crate) fn record_rejection(&mut self, error: ActionError) {
        log::debug!("action rejected: {error}");
        self.rejected_actions += 1;
    }
}
