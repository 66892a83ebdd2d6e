use arrayvec::ArrayVec;

use crate::{Piece, ReserveFullError};

/// Number of slots in the reserve stack.
pub const RESERVE_CAPACITY: usize = 3;

/// Fixed-capacity LIFO of reserved pieces.
///
/// Slot 0 is the base; the top is the last occupied slot, so the top index is
/// `len - 1` and an empty stack has no top.
#[derive(Debug, Clone, Default)]
pub struct ReserveStack {
    pieces: ArrayVec<Piece, RESERVE_CAPACITY>,
}

impl ReserveStack {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pieces: ArrayVec::new_const(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.pieces.is_full()
    }

    /// Index of the top slot, or `None` when the stack is empty.
    #[must_use]
    pub fn top_index(&self) -> Option<usize> {
        self.pieces.len().checked_sub(1)
    }

    /// Returns the most recently pushed piece, if any.
    #[must_use]
    pub fn top(&self) -> Option<Piece> {
        self.pieces.last().copied()
    }

    /// Pushes a piece on top of the stack.
    ///
    /// A full stack rejects the piece and stays unchanged.
    pub fn push(&mut self, piece: Piece) -> Result<(), ReserveFullError> {
        self.pieces
            .try_push(piece)
            .map_err(|err| ReserveFullError {
                piece: err.element(),
            })
    }

    /// Removes and returns the top piece, or `None` when the stack is empty.
    pub fn pop(&mut self) -> Option<Piece> {
        self.pieces.pop()
    }

    /// Returns the piece `depth` slots below the top, if any.
    ///
    /// Depth 0 is the top itself.
    #[must_use]
    pub fn get_from_top(&self, depth: usize) -> Option<Piece> {
        let index = self.top_index()?.checked_sub(depth)?;
        self.pieces.get(index).copied()
    }

    /// Mutable access to the piece `depth` slots below the top.
    ///
    /// Depth 0 is the top itself.
    pub fn get_from_top_mut(&mut self, depth: usize) -> Option<&mut Piece> {
        let index = self.top_index()?.checked_sub(depth)?;
        self.pieces.get_mut(index)
    }

    /// Iterates over the reserved pieces from top to base.
    pub fn iter(&self) -> impl Iterator<Item = Piece> + '_ {
        self.pieces.iter().rev().copied()
    }

    /// Copies the reserved pieces, most recently pushed first.
    #[must_use]
    pub fn snapshot(&self) -> ArrayVec<Piece, RESERVE_CAPACITY> {
        self.iter().collect()
    }
}
