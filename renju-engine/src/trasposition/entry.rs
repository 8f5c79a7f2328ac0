use renju_core::Move;

use crate::evaluation::EvalScore;

/// How a stored score relates to the search window that produced it
/// (spec.md §3's `Entry.bound`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// The stored score is the position's true value.
    Exact,
    /// A beta cutoff occurred; the true value is at least this score.
    LowerBound,
    /// Every move failed to reach alpha; the true value is at most this score.
    UpperBound,
}

/// One transposition table slot (spec.md §3's `TranspositionTable` entry).
#[derive(Debug, Clone, Copy)]
pub struct TTEntry {
    pub hash: u64,
    pub score: EvalScore,
    pub depth: u8,
    pub bound: Bound,
    pub best_move: Option<Move>,
    pub generation: u32,
}
