use renju_core::Move;

/// The principal variation extracted after a search (spec.md §3's PV,
/// built by `iterative::extract_pv` walking TT `bestMove` pointers, not
/// threaded live through the recursion).
#[derive(Debug, Clone, Default)]
pub struct PVLine {
    moves: Vec<Move>,
}

impl PVLine {
    pub fn new() -> Self {
        Self { moves: Vec::new() }
    }

    pub fn clear(&mut self) {
        self.moves.clear();
    }

    pub fn first(&self) -> Option<Move> {
        self.moves.first().copied()
    }

    pub fn as_slice(&self) -> &[Move] {
        &self.moves
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn push(&mut self, mv: Move) {
        self.moves.push(mv);
    }

    pub fn truncate(&mut self, len: usize) {
        self.moves.truncate(len);
    }

    /// Prepends `mv` to a child line, building a new parent line.
    pub fn update_line(&mut self, mv: Move, child_line: &Self) {
        self.moves.clear();
        self.moves.push(mv);
        self.moves.extend_from_slice(&child_line.moves);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_line_prepends_to_empty_line() {
        let mut pv = PVLine::new();
        let child = PVLine::new();
        pv.update_line(Move::new(7, 7), &child);
        assert_eq!(pv.as_slice(), &[Move::new(7, 7)]);
    }

    #[test]
    fn update_line_prepends_to_nonempty_child() {
        let mut pv = PVLine::new();
        let mut child = PVLine::new();
        child.push(Move::new(8, 8));
        child.push(Move::new(6, 6));
        pv.update_line(Move::new(7, 7), &child);
        assert_eq!(pv.as_slice(), &[Move::new(7, 7), Move::new(8, 8), Move::new(6, 6)]);
    }
}
