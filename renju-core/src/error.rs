use thiserror::Error;

/// Errors surfaced by board construction, notation parsing, and move
/// application (spec.md §8).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenjuError {
    #[error("position ({row}, {col}) is outside the 15x15 board")]
    OutOfBounds { row: i32, col: i32 },

    #[error("cell ({row}, {col}) is already occupied")]
    OccupiedCell { row: u8, col: u8 },

    #[error("'{0}' is not a valid move notation")]
    BadNotation(String),

    #[error("move history is inconsistent: {0}")]
    InconsistentHistory(String),
}
