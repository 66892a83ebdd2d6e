//! Piece queue and reserve stack logic.
//!
//! This module provides the data structures and the controller that drives
//! them:
//!
//! - [`PieceQueue`] - Circular FIFO of the next [`QUEUE_CAPACITY`] pieces
//! - [`ReserveStack`] - LIFO holding up to [`RESERVE_CAPACITY`] reserved pieces
//! - [`PieceGenerator`] - Random piece kinds with sequential ids
//! - [`PieceSeed`] - Seed for deterministic piece generation
//! - [`GameController`] - Play, reserve, use and swap actions
//! - [`GameStats`] - Counters of what happened during a session
//!
//! # Flow
//!
//! 1. Create a [`GameController`]; its queue starts full and its stack empty
//! 2. Apply [`GameAction`]s one at a time
//! 3. Each action returns an [`ActionReport`] or a non-fatal
//!    [`ActionError`](crate::ActionError) that left everything unchanged
//!
//! # Example
//!
//! ```
//! use piece_reserve_engine::{ActionReport, GameAction, GameController};
//!
//! let mut controller = GameController::new();
//!
//! for _ in 0..3 {
//!     controller.apply(GameAction::Reserve).unwrap();
//! }
//!
//! let report = controller.apply(GameAction::SwapMultiple).unwrap();
//! assert!(matches!(report, ActionReport::SwappedMultiple { .. }));
//! ```

pub use self::{
    game_controller::*, game_stats::*, piece_generator::*, piece_queue::*, reserve_stack::*,
};

mod game_controller;
mod game_stats;
mod piece_generator;
mod piece_queue;
mod reserve_stack;
