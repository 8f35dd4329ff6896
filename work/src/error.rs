use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkError {
    #[error("difficulty {difficulty} exceeds the maximum of {max} hex digits")]
    DifficultyOutOfRange { difficulty: u32, max: u32 },

    #[error("proof search cancelled")]
    Cancelled,

    #[error("proof space exhausted without a valid proof")]
    Exhausted,
}
