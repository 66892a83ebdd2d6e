use std::mem;

use arrayvec::ArrayVec;
use serde::Serialize;

use crate::{
    ActionError,
    core::piece::{Piece, PieceId},
};

use super::{
    GameStats,
    piece_generator::{PieceGenerator, PieceSeed},
    piece_queue::{PieceQueue, QUEUE_CAPACITY},
    reserve_stack::{RESERVE_CAPACITY, ReserveStack},
};

/// Number of pieces exchanged by [`GameController::swap_multiple`].
pub const MULTIPLE_SWAP_COUNT: usize = 3;

/// An action the player can take on the current queue and reserve stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum GameAction {
    Play,
    Reserve,
    UseReserved,
    SwapFront,
    SwapMultiple,
}

/// What a successful action did, naming the pieces involved.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ActionReport {
    #[display("Played piece: {piece}")]
    Played { piece: Piece, refill: Option<Piece> },
    #[display("Piece {piece} reserved")]
    Reserved { piece: Piece, refill: Option<Piece> },
    #[display("Used piece: {piece}")]
    Used { piece: Piece },
    /// `queue_front` and `stack_top` are the pieces found there before the swap.
    #[display("Swapped queue front {queue_front} with stack top {stack_top}")]
    SwappedFront { queue_front: Piece, stack_top: Piece },
    /// Each pair is `(queue piece, stack piece)` before the swap, front/top first.
    #[display("Swapped the first 3 queue pieces with the reserve stack")]
    SwappedMultiple {
        pairs: ArrayVec<(Piece, Piece), MULTIPLE_SWAP_COUNT>,
    },
}

/// Point-in-time copy of the controller's visible state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateSnapshot {
    /// Queued pieces, front first.
    pub queue: ArrayVec<Piece, QUEUE_CAPACITY>,
    /// Reserved pieces, top first.
    pub reserve: ArrayVec<Piece, RESERVE_CAPACITY>,
    pub next_id: PieceId,
}

/// Owns the piece queue, the reserve stack and the piece generator, and
/// implements every player action on them.
///
/// Each action is an independent transaction: it either succeeds and returns
/// an [`ActionReport`], or is rejected with an [`ActionError`] and leaves the
/// queue and stack as they were. The one exception is [`Self::play`], which
/// tops the queue up even when it found nothing to play.
///
/// # Example
///
/// ```
/// use piece_reserve_engine::{ActionError, GameController};
///
/// let mut controller = GameController::new();
/// assert_eq!(controller.queue().len(), 5);
///
/// controller.reserve().unwrap();
/// assert_eq!(controller.queue().len(), 5);
/// assert_eq!(controller.reserve_stack().len(), 1);
///
/// controller.use_reserved().unwrap();
/// assert_eq!(controller.use_reserved(), Err(ActionError::ReserveEmpty));
/// ```
#[derive(Debug, Clone)]
pub struct GameController {
    queue: PieceQueue,
    reserve: ReserveStack,
    generator: PieceGenerator,
    stats: GameStats,
}

impl Default for GameController {
    fn default() -> Self {
        Self::new()
    }
}

impl GameController {
    /// Creates a controller with a random seed and a full queue.
    #[must_use]
    pub fn new() -> Self {
        Self::with_generator(PieceGenerator::new())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic piece generation.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self::with_generator(PieceGenerator::with_seed(seed))
    }

    fn with_generator(generator: PieceGenerator) -> Self {
        let mut this = Self {
            queue: PieceQueue::new(),
            reserve: ReserveStack::new(),
            generator,
            stats: GameStats::new(),
        };
        while this.refill_queue().is_some() {}
        log::debug!("initial queue: {:?}", this.queue.snapshot());
        this
    }

    #[must_use]
    pub fn queue(&self) -> &PieceQueue {
        &self.queue
    }

    #[must_use]
    pub fn reserve_stack(&self) -> &ReserveStack {
        &self.reserve
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn seed(&self) -> PieceSeed {
        self.generator.seed()
    }

    #[must_use]
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            queue: self.queue.snapshot(),
            reserve: self.reserve.snapshot(),
            next_id: self.generator.next_id(),
        }
    }

    /// Creates a new piece with a random kind and the next id.
    pub fn generate_piece(&mut self) -> Piece {
        self.generator.generate()
    }

    /// Enqueues one freshly generated piece unless the queue is already full.
    ///
    /// No id is consumed when the queue is full.
    fn refill_queue(&mut self) -> Option<Piece> {
        if self.queue.is_full() {
            return None;
        }
        let piece = self.generate_piece();
        self.queue.enqueue(piece).is_ok().then_some(piece)
    }

    /// Runs `action` and returns what it did.
    pub fn apply(&mut self, action: GameAction) -> Result<ActionReport, ActionError> {
        match action {
            GameAction::Play => self.play(),
            GameAction::Reserve => self.reserve(),
            GameAction::UseReserved => self.use_reserved(),
            GameAction::SwapFront => self.swap_front(),
            GameAction::SwapMultiple => self.swap_multiple(),
        }
    }

    /// Plays the front piece and tops the queue back up with a new piece.
    ///
    /// The refill happens whenever the queue is below capacity afterwards,
    /// so an empty queue still gains a piece even though nothing was played.
    pub fn play(&mut self) -> Result<ActionReport, ActionError> {
        let played = self.queue.dequeue();
        let refill = self.refill_queue();
        let result = played
            .map(|piece| ActionReport::Played { piece, refill })
            .ok_or(ActionError::QueueEmpty);
        self.track(result)
    }

    /// Moves the front piece onto the reserve stack and refills the queue.
    pub fn reserve(&mut self) -> Result<ActionReport, ActionError> {
        let result = self.try_reserve();
        self.track(result)
    }

    fn try_reserve(&mut self) -> Result<ActionReport, ActionError> {
        if self.reserve.is_full() {
            return Err(ActionError::ReserveFull);
        }
        let piece = self.queue.dequeue().ok_or(ActionError::QueueEmpty)?;
        self.reserve
            .push(piece)
            .map_err(|_| ActionError::ReserveFull)?;
        let refill = self.refill_queue();
        Ok(ActionReport::Reserved { piece, refill })
    }

    /// Takes the top piece off the reserve stack. The stack is never refilled.
    pub fn use_reserved(&mut self) -> Result<ActionReport, ActionError> {
        let result = self
            .reserve
            .pop()
            .map(|piece| ActionReport::Used { piece })
            .ok_or(ActionError::ReserveEmpty);
        self.track(result)
    }

    /// Exchanges the queue front with the stack top in place.
    pub fn swap_front(&mut self) -> Result<ActionReport, ActionError> {
        let result = self.try_swap_front();
        self.track(result)
    }

    fn try_swap_front(&mut self) -> Result<ActionReport, ActionError> {
        let (Some(front), Some(top)) = (self.queue.get_mut(0), self.reserve.get_from_top_mut(0))
        else {
            return Err(ActionError::NotEnoughPieces);
        };
        let report = ActionReport::SwappedFront {
            queue_front: *front,
            stack_top: *top,
        };
        mem::swap(front, top);
        Ok(report)
    }

    /// Exchanges the first three queue pieces with the three reserved pieces.
    ///
    /// Queue offset `i` from the front is paired with stack depth `i` below
    /// the top. Requires at least three queued pieces and a stack whose top
    /// index is at least 2.
    pub fn swap_multiple(&mut self) -> Result<ActionReport, ActionError> {
        let result = self.try_swap_multiple();
        self.track(result)
    }

    fn try_swap_multiple(&mut self) -> Result<ActionReport, ActionError> {
        if self.queue.len() < MULTIPLE_SWAP_COUNT
            || self.reserve.top_index() < Some(MULTIPLE_SWAP_COUNT - 1)
        {
            return Err(ActionError::InsufficientQuantity);
        }

        // every pair is resolved before any slot is written
        let pairs: ArrayVec<(Piece, Piece), MULTIPLE_SWAP_COUNT> = (0..MULTIPLE_SWAP_COUNT)
            .map(|depth| Some((self.queue.get(depth)?, self.reserve.get_from_top(depth)?)))
            .collect::<Option<_>>()
            .ok_or(ActionError::InsufficientQuantity)?;

        for (depth, &(queued, reserved)) in pairs.iter().enumerate() {
            if let Some(slot) = self.queue.get_mut(depth) {
                *slot = reserved;
            }
            if let Some(slot) = self.reserve.get_from_top_mut(depth) {
                *slot = queued;
            }
        }
        Ok(ActionReport::SwappedMultiple { pairs })
    }

    fn track(
        &mut self,
        result: Result<ActionReport, ActionError>,
    ) -> Result<ActionReport, ActionError> {
        match &result {
            Ok(report) => {
                log::debug!("{report}");
                match report {
                    ActionReport::Played { .. } => self.stats.record_play(),
                    ActionReport::Reserved { .. } => self.stats.record_reserve(),
                    ActionReport::Used { .. } => self.stats.record_use(),
                    ActionReport::SwappedFront { .. } => self.stats.record_front_swap(),
                    ActionReport::SwappedMultiple { .. } => self.stats.record_multiple_swap(),
                }
            }
            Err(error) => self.stats.record_rejection(*error),
        }
        result
    }
}
