//! Error types for engine operations.
//!
//! Only recoverable conditions live here. Applying an unvalidated move is a
//! programming error and panics inside [`crate::board::Board::apply`].

use thiserror::Error;

use crate::types::Side;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Square is occupied or the move would flip nothing.
    #[error("illegal move at row {row}, col {col}")]
    IllegalMove { row: u8, col: u8 },

    #[error("row/col out of range: ({row}, {col})")]
    OutOfRange { row: u8, col: u8 },

    #[error("game is already over")]
    GameOver,

    #[error("it is {to_move:?}'s turn")]
    NotYourTurn { to_move: Side },

    #[error("search depth {0} is outside 1..={max}", max = crate::ai::level::MAX_DEPTH)]
    InvalidDepth(u8),

    #[error("unknown level: {0}")]
    UnknownLevel(String),

    #[error("invalid board diagram: {0}")]
    InvalidDiagram(String),
}

pub type EngineResult<T> = Result<T, EngineError>;
