use thiserror::Error;

/// Reasons a board string can be rejected by `setup`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("board string must start with 64 squares, found {0}")]
    WrongLength(usize),

    #[error("invalid square character {ch:?} at index {index}")]
    InvalidSquare { index: usize, ch: char },

    #[error("invalid side to move {0:?}, expected 0 or 1")]
    InvalidSide(String),

    #[error("side not to move has no pieces")]
    NoOpponentPieces,

    #[error("side to move already has a piece on its goal rank")]
    MoverOnGoalRank,

    #[error("side not to move has {0} pieces on its goal rank")]
    MultipleBreakthroughs(u32),
}

/// Reasons a move in `a2-a3` / `d4xe5` notation can fail to parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveParseError {
    #[error("move {0:?} must look like a2-a3 or d4xe5")]
    Malformed(String),

    #[error("unknown square {0:?}")]
    BadSquare(String),
}
