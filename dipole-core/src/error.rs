//! Error types for board construction and checked move application.

use thiserror::Error;

use crate::{Color, Move, Pos, MAX_DIMENSION};

/// A `GameConfig` (or serialized board) that cannot describe a playable board.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board dimension {0} is outside 2..={max}", max = MAX_DIMENSION)]
    Dimension(u8),
    #[error("{color} start cell {pos} is off a {dimension}x{dimension} board")]
    StartOutOfBounds { color: Color, pos: Pos, dimension: u8 },
    #[error("both sides start on {0}")]
    SharedStart(Pos),
    #[error("start stacks must hold at least one token")]
    ZeroStartSize,
    #[error("expected {expected} cells, found {found}")]
    CellCount { expected: usize, found: usize },
    #[error("a stack of size 0 cannot sit on the board")]
    EmptyStack,
}

/// Reasons `Board::try_apply` refuses a move.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("move {0} leaves the board")]
    OutOfBounds(Move),
    #[error("no stack at {0}")]
    EmptySource(Pos),
    #[error("stack at {pos} does not belong to {expected}")]
    WrongColor { pos: Pos, expected: Color },
    #[error("move {0} is not legal in this position")]
    Illegal(Move),
}
