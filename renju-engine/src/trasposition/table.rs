use renju_core::Move;
use rustc_hash::FxHashMap;

use crate::evaluation::EvalScore;

use super::{Bound, TTEntry};

/// Snapshot of table occupancy, exposed for `tracing`-level debug logs and
/// the engine's statistics bundle (SPEC_FULL.md §5's "ambient addition").
#[derive(Debug, Clone, Copy)]
pub struct TTStats {
    pub entries: usize,
    pub capacity: usize,
}

/// Bounded hash → `Entry` map (spec.md §3's `TranspositionTable`, §4.6).
///
/// The engine is single-threaded (spec.md §1's non-goals exclude
/// multi-threaded search), so there is no need for the teacher's lockless
/// raw-pointer table; a plain hash map keyed by the Zobrist hash itself
/// already gives `probe(h).hash == h` for free, with no second-chance
/// collision check needed beyond the map's own key equality.
pub struct TTable {
    capacity: usize,
    generation: u32,
    insert_seq: u64,
    map: FxHashMap<u64, (TTEntry, u64)>,
}

impl TTable {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            generation: 0,
            insert_seq: 0,
            map: FxHashMap::default(),
        }
    }

    pub fn current_generation(&self) -> u32 {
        self.generation
    }

    /// Bumps the generation counter, called between top-level searches
    /// (spec.md §3).
    pub fn new_generation(&mut self) {
        self.generation += 1;
    }

    /// Returns the stored entry iff its hash matches `hash`.
    pub fn probe(&self, hash: u64) -> Option<&TTEntry> {
        self.map.get(&hash).map(|(entry, _)| entry).filter(|e| e.hash == hash)
    }

    /// Applies the replacement policy of spec.md §3 and stores the result,
    /// evicting if the table is at capacity.
    pub fn store(&mut self, hash: u64, score: EvalScore, depth: u8, bound: Bound, best_move: Option<Move>) {
        let new_entry = TTEntry { hash, score, depth, bound, best_move, generation: self.generation };

        if let Some((existing, seq)) = self.map.get(&hash) {
            if !should_replace(existing, &new_entry, self.generation) {
                return;
            }
            let seq = *seq;
            self.map.insert(hash, (new_entry, seq));
            return;
        }

        if self.map.len() >= self.capacity {
            self.evict_for_insert();
        }

        self.insert_seq += 1;
        self.map.insert(hash, (new_entry, self.insert_seq));
    }

    fn evict_for_insert(&mut self) {
        let target = self.capacity * 3 / 4;
        let current_gen = self.generation;

        // First pass: drop anything more than one generation stale.
        self.map.retain(|_, (entry, _)| entry.generation + 1 >= current_gen);

        if self.map.len() <= target {
            return;
        }

        // Still over target: drop oldest-inserted entries until we reach it.
        let mut by_age: Vec<(u64, u64)> = self.map.iter().map(|(&h, &(_, seq))| (h, seq)).collect();
        by_age.sort_unstable_by_key(|&(_, seq)| seq);
        let to_drop = self.map.len() - target;
        for (hash, _) in by_age.into_iter().take(to_drop) {
            self.map.remove(&hash);
        }
    }

    pub fn clear(&mut self) {
        self.map.clear();
        self.generation = 0;
        self.insert_seq = 0;
    }

    pub fn stats(&self) -> TTStats {
        TTStats { entries: self.map.len(), capacity: self.capacity }
    }
}

/// Replacement policy (spec.md §3): a new write replaces the existing entry
/// when any of { new is Exact; new.depth > existing.depth; same depth and
/// new isn't an UpperBound; existing is more than one generation stale }.
fn should_replace(existing: &TTEntry, new_entry: &TTEntry, current_generation: u32) -> bool {
    if new_entry.bound == Bound::Exact {
        return true;
    }
    if new_entry.depth > existing.depth {
        return true;
    }
    if new_entry.depth == existing.depth && new_entry.bound != Bound::UpperBound {
        return true;
    }
    if existing.generation + 1 < current_generation {
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use renju_core::Move;

    #[test]
    fn probe_returns_none_for_empty_table() {
        let tt = TTable::new(16);
        assert!(tt.probe(42).is_none());
    }

    #[test]
    fn store_then_probe_roundtrips() {
        let mut tt = TTable::new(16);
        tt.store(42, 100, 5, Bound::Exact, Some(Move::new(7, 7)));
        let entry = tt.probe(42).unwrap();
        assert_eq!(entry.score, 100);
        assert_eq!(entry.depth, 5);
        assert_eq!(entry.best_move, Some(Move::new(7, 7)));
    }

    #[test]
    fn shallower_non_exact_write_does_not_overwrite_deeper_entry() {
        let mut tt = TTable::new(16);
        tt.store(1, 500, 8, Bound::LowerBound, None);
        tt.store(1, 10, 2, Bound::LowerBound, None);
        assert_eq!(tt.probe(1).unwrap().score, 500);
    }

    #[test]
    fn exact_write_always_replaces() {
        let mut tt = TTable::new(16);
        tt.store(1, 500, 8, Bound::LowerBound, None);
        tt.store(1, 10, 2, Bound::Exact, None);
        assert_eq!(tt.probe(1).unwrap().score, 10);
    }

    #[test]
    fn eviction_keeps_table_within_capacity() {
        let mut tt = TTable::new(8);
        for i in 0..32u64 {
            tt.store(i, i as EvalScore, 1, Bound::Exact, None);
        }
        assert!(tt.stats().entries <= 8);
    }

    #[test]
    fn new_generation_increments_counter() {
        let mut tt = TTable::new(8);
        assert_eq!(tt.current_generation(), 0);
        tt.new_generation();
        assert_eq!(tt.current_generation(), 1);
    }
}
