pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("piece queue is full, cannot enqueue {piece}")]
pub struct QueueFullError {
    pub piece: Piece,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("reserve stack is full, cannot push {piece}")]
pub struct ReserveFullError {
    pub piece: Piece,
}

/// Reasons a controller action is rejected.
///
/// Every variant is a non-fatal notification and the session goes on. The
/// rejected action leaves the queue and the reserve stack untouched, except
/// for [`QueueEmpty`](Self::QueueEmpty) from
/// [`GameController::play`](crate::GameController::play), which still tops the
/// empty queue up with one new piece.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::IsVariant,
)]
pub enum ActionError {
    #[display("no piece in the queue")]
    QueueEmpty,
    #[display("reserve stack is full, cannot reserve more pieces")]
    ReserveFull,
    #[display("reserve stack is empty, no reserved piece available")]
    ReserveEmpty,
    #[display("not enough pieces to swap")]
    NotEnoughPieces,
    #[display("multiple swap not possible (insufficient quantity)")]
    InsufficientQuantity,
}
