use rustc_hash::FxHashMap;

use renju_core::{check_forbidden_move, Board, ForbiddenResult};

/// Bound on live entries before the whole cache is wiped (spec.md §4.7).
/// Chosen over an LRU scheme because a full wipe is simpler and cheap
/// relative to how often the per-search cache fills up.
const MAX_ENTRIES: usize = 100_000;

/// Per-hash memoization of forbidden-move tests (spec.md §3, §4.7), cleared
/// at the start of every top-level search. Keyed by `(hash, row, col)`
/// rather than `hash` alone since a single position can query forbiddenness
/// at many candidate cells.
#[derive(Default)]
pub struct ForbiddenCache {
    map: FxHashMap<(u64, u8, u8), ForbiddenResult>,
}

impl ForbiddenCache {
    pub fn new() -> Self {
        Self { map: FxHashMap::default() }
    }

    pub fn get(&self, hash: u64, row: u8, col: u8) -> Option<&ForbiddenResult> {
        self.map.get(&(hash, row, col))
    }

    pub fn set(&mut self, hash: u64, row: u8, col: u8, result: ForbiddenResult) {
        if self.map.len() >= MAX_ENTRIES {
            self.map.clear();
        }
        self.map.insert((hash, row, col), result);
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Memoized wrapper over `check_forbidden_move` (spec.md §4.7): falls back
/// to the rule predicate on a cache miss and records the result under the
/// board's current hash.
pub fn check_forbidden_move_with_cache(cache: &mut ForbiddenCache, board: &Board, row: u8, col: u8, hash: u64) -> ForbiddenResult {
    if let Some(cached) = cache.get(hash, row, col) {
        return cached.clone();
    }

    let result = check_forbidden_move(board, row, col);
    cache.set(hash, row, col, result.clone());
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use renju_core::Move;

    #[test]
    fn cache_hit_agrees_with_direct_check() {
        let mut board = Board::new();
        board.place_in_place(Move::new(7, 7), renju_core::Color::White);
        let mut cache = ForbiddenCache::new();
        let hash = board.zobrist_key();

        let direct = check_forbidden_move(&board, 8, 8);
        let cached = check_forbidden_move_with_cache(&mut cache, &board, 8, 8, hash);
        assert_eq!(direct.is_forbidden, cached.is_forbidden);

        // Second call must hit the cache and still agree.
        let cached_again = check_forbidden_move_with_cache(&mut cache, &board, 8, 8, hash);
        assert_eq!(cached_again.is_forbidden, direct.is_forbidden);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn overflow_wipes_the_table() {
        let board = Board::new();
        let mut cache = ForbiddenCache::new();
        for i in 0..MAX_ENTRIES {
            let row = (i / 15 % 15) as u8;
            let col = (i % 15) as u8;
            let hash = i as u64;
            check_forbidden_move_with_cache(&mut cache, &board, row, col, hash);
        }
        assert!(cache.len() <= MAX_ENTRIES);
    }
}
