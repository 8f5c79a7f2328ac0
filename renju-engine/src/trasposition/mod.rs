mod entry;
mod table;

pub use entry::{Bound, TTEntry};
pub use table::{TTStats, TTable};

/// Default table capacity (spec.md §3: "Capacity M (default ≈ 2 × 10^6)").
pub const DEFAULT_TT_CAPACITY: usize = 2_000_000;
