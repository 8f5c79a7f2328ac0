use renju_core::Move;

/// The threats a color currently poses, as seen by whoever must decide how
/// to answer them (spec.md §4.4). Shared between the evaluator (which
/// consumes it to drive the mandatory-defense gate) and the threat
/// detector (which builds it).
#[derive(Debug, Clone, Default)]
pub struct ThreatSet {
    /// Empty cells where the threatening color would complete an open
    /// four if it moved there. These are the opponent's must-block squares.
    pub open_fours: Vec<Move>,
    /// Empty cells where the threatening color would complete a (closed or
    /// jump) four, excluding ones already counted in `open_fours`.
    pub fours: Vec<Move>,
    /// Defense squares of every *existing* open three the threatening
    /// color already has on the board.
    pub open_three_defenses: Vec<Move>,
    /// Empty cells where the threatening color can create a four-three on
    /// its next move.
    pub mises: Vec<Move>,
}

impl ThreatSet {
    pub fn highest_threat(&self) -> Option<Move> {
        self.open_fours.first().copied().or_else(|| self.fours.first().copied())
    }

    pub fn is_empty(&self) -> bool {
        self.open_fours.is_empty() && self.fours.is_empty() && self.open_three_defenses.is_empty()
    }
}
