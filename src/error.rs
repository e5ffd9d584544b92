//! Error types returned by the rules layer.

use std::num::ParseIntError;

use thiserror::Error;

/// The error type returned when a move cannot be applied to a position.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("inconsistent move: {0}")]
    Inconsistent(&'static str),

    #[error("it is not your turn to move")]
    EnemysTurn,
}

/// The error type returned when parsing a SFEN string fails.
#[derive(Error, Debug)]
pub enum SfenError {
    #[error("data fields are missing")]
    MissingDataFields,

    #[error("an illegal board state found")]
    IllegalBoardState,

    #[error("an illegal piece type found")]
    IllegalPieceType,

    #[error("an illegal side to move found")]
    IllegalSideToMove,

    #[error("an illegal ply count found")]
    IllegalPlyCount(#[from] ParseIntError),
}
