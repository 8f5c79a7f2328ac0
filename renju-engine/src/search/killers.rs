use renju_core::Move;

/// Maximum search depth the killer table tracks; pushes past this are a
/// no-op (spec.md §3's `KillerTable`).
const D_MAX: usize = 128;

const MAX_KILLERS: usize = 2;

/// For each depth, up to two moves that have caused a beta cutoff there.
/// Most-recent first; duplicates are rejected rather than re-inserted.
pub struct KillerTable {
    slots: Vec<[Option<Move>; MAX_KILLERS]>,
}

impl KillerTable {
    pub fn new() -> Self {
        Self { slots: vec![[None; MAX_KILLERS]; D_MAX] }
    }

    /// Records a cutoff move at `depth`. A no-op past `D_MAX` and when `mv`
    /// is already the most recent killer at that depth.
    pub fn push(&mut self, depth: usize, mv: Move) {
        let Some(slot) = self.slots.get_mut(depth) else { return };

        if slot[0] == Some(mv) {
            return;
        }
        if slot[1] == Some(mv) {
            slot.swap(0, 1);
            return;
        }

        slot[1] = slot[0];
        slot[0] = Some(mv);
    }

    /// The killers recorded at `depth`, most-recent first, with `None`
    /// slots dropped.
    pub fn at(&self, depth: usize) -> Vec<Move> {
        match self.slots.get(depth) {
            Some(slot) => slot.iter().filter_map(|m| *m).collect(),
            None => Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = [None; MAX_KILLERS];
        }
    }
}

impl Default for KillerTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_then_at_returns_most_recent_first() {
        let mut table = KillerTable::new();
        table.push(3, Move::new(7, 7));
        table.push(3, Move::new(8, 8));
        assert_eq!(table.at(3), vec![Move::new(8, 8), Move::new(7, 7)]);
    }

    #[test]
    fn duplicate_push_does_not_grow_the_slot() {
        let mut table = KillerTable::new();
        table.push(3, Move::new(7, 7));
        table.push(3, Move::new(8, 8));
        table.push(3, Move::new(7, 7));
        assert_eq!(table.at(3).len(), 2);
    }

    #[test]
    fn depth_beyond_table_is_a_no_op() {
        let mut table = KillerTable::new();
        table.push(10_000, Move::new(7, 7));
        assert!(table.at(10_000).is_empty());
    }
}
