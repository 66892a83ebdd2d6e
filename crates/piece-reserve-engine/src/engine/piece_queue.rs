use arrayvec::ArrayVec;

use crate::{Piece, QueueFullError};

/// Number of slots in the piece queue.
pub const QUEUE_CAPACITY: usize = 5;

/// Fixed-capacity circular FIFO of upcoming pieces.
///
/// The queue stores pieces in a ring of [`QUEUE_CAPACITY`] slots with an
/// explicit head index and element count. The tail is derived as
/// `(head + len) % QUEUE_CAPACITY`.
///
/// # Example
///
/// ```
/// use piece_reserve_engine::{Piece, PieceId, PieceKind, PieceQueue};
///
/// let mut queue = PieceQueue::new();
/// let piece = Piece::new(PieceKind::O, PieceId::new(0));
///
/// queue.enqueue(piece).unwrap();
/// assert_eq!(queue.dequeue(), Some(piece));
/// assert_eq!(queue.dequeue(), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PieceQueue {
    slots: [Option<Piece>; QUEUE_CAPACITY],
    head: usize,
    len: usize,
}

impl PieceQueue {
    /// Creates an empty queue.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: [None; QUEUE_CAPACITY],
            head: 0,
            len: 0,
        }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.len == QUEUE_CAPACITY
    }

    const fn slot_index(&self, offset: usize) -> usize {
        (self.head + offset) % QUEUE_CAPACITY
    }

    /// Appends a piece at the tail of the queue.
    ///
    /// A full queue rejects the piece and stays unchanged; the rejected piece
    /// is handed back in the error.
    pub fn enqueue(&mut self, piece: Piece) -> Result<(), QueueFullError> {
        if self.is_full() {
            return Err(QueueFullError { piece });
        }
        let tail = self.slot_index(self.len);
        self.slots[tail] = Some(piece);
        self.len += 1;
        Ok(())
    }

    /// Removes and returns the piece at the front of the queue.
    ///
    /// Returns `None` without touching the queue when it is empty.
    pub fn dequeue(&mut self) -> Option<Piece> {
        if self.is_empty() {
            return None;
        }
        let piece = self.slots[self.head].take();
        self.head = self.slot_index(1);
        self.len -= 1;
        piece
    }

    /// Returns the piece at the front of the queue, if any.
    #[must_use]
    pub fn front(&self) -> Option<Piece> {
        self.get(0)
    }

    /// Returns the piece `offset` positions behind the front, if any.
    #[must_use]
    pub fn get(&self, offset: usize) -> Option<Piece> {
        if offset >= self.len {
            return None;
        }
        self.slots[self.slot_index(offset)]
    }

    /// Mutable access to the piece `offset` positions behind the front.
    ///
    /// Used to exchange pieces in place without changing the queue order
    /// or length.
    pub fn get_mut(&mut self, offset: usize) -> Option<&mut Piece> {
        if offset >= self.len {
            return None;
        }
        let index = self.slot_index(offset);
        self.slots[index].as_mut()
    }

    /// Iterates over the queued pieces from front to back.
    pub fn iter(&self) -> impl Iterator<Item = Piece> + '_ {
        (0..self.len).filter_map(|offset| self.slots[self.slot_index(offset)])
    }

    /// Copies the queued pieces in front-to-back order.
    #[must_use]
    pub fn snapshot(&self) -> ArrayVec<Piece, QUEUE_CAPACITY> {
        self.iter().collect()
    }
}
