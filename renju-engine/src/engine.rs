use renju_core::{Board, Color, Move};

use crate::evaluation::EvaluationOptions;
use crate::forbidden_cache::ForbiddenCache;
use crate::iterative::{extract_pv, find_best_move_iterative, IterativeOptions, IterativeResult};
use crate::trasposition::{TTable, DEFAULT_TT_CAPACITY};

/// Plies of continuation requested past a root candidate when building its
/// own principal variation for the review worker (spec.md §6's
/// `ReviewCandidate.principalVariation`); one less than the root driver's own
/// `PV_MAX_LEN` since the candidate move itself takes the first slot.
const CANDIDATE_PV_MAX_LEN: usize = 9;

/// How hard the engine looks for a move. Maps to an `EvaluationOptions`
/// bundle plus a `(depth, softTimeMs, maxNodes)` triple (spec.md §6); Hard
/// runs every heuristic at full depth, Easy and Medium progressively turn
/// off the more expensive tactical bonuses and shrink the time/node budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

pub struct DifficultyPreset {
    pub eval_options: EvaluationOptions,
    pub max_depth: u8,
    pub soft_time_ms: u64,
    pub max_nodes: Option<u64>,
}

impl Difficulty {
    pub fn preset(&self) -> DifficultyPreset {
        match self {
            Difficulty::Easy => DifficultyPreset {
                eval_options: EvaluationOptions {
                    enable_vct: false,
                    enable_forbidden_trap: false,
                    enable_multi_threat: false,
                    enable_mise: false,
                    enable_mise_threat: false,
                    ..EvaluationOptions::minimal()
                },
                max_depth: 4,
                soft_time_ms: 300,
                max_nodes: Some(200_000),
            },
            Difficulty::Medium => DifficultyPreset {
                eval_options: EvaluationOptions {
                    enable_vct: false,
                    enable_forbidden_trap: true,
                    enable_multi_threat: false,
                    ..EvaluationOptions::default()
                },
                max_depth: 8,
                soft_time_ms: 1_000,
                max_nodes: Some(1_500_000),
            },
            Difficulty::Hard => DifficultyPreset {
                eval_options: EvaluationOptions::all_enabled(),
                max_depth: 14,
                soft_time_ms: 5_000,
                max_nodes: None,
            },
        }
    }
}

/// Owns the long-lived search tables so they survive across moves within a
/// single game (spec.md §3's `TranspositionTable`/`ForbiddenCache` as
/// engine-level state, not per-call allocations).
pub struct Engine {
    tt: TTable,
    forbidden_cache: ForbiddenCache,
}

impl Engine {
    pub fn new() -> Self {
        Self {
            tt: TTable::new(DEFAULT_TT_CAPACITY),
            forbidden_cache: ForbiddenCache::new(),
        }
    }

    pub fn with_tt_capacity(tt_capacity: usize) -> Self {
        Self {
            tt: TTable::new(tt_capacity),
            forbidden_cache: ForbiddenCache::new(),
        }
    }

    /// Finds the best move for `color` on `board` at the given difficulty
    /// (spec.md §4.9's top-level entry point).
    pub fn find_best_move(&mut self, board: &mut Board, color: Color, difficulty: Difficulty) -> IterativeResult {
        let preset = difficulty.preset();
        let opts = IterativeOptions::new(preset.max_depth, preset.soft_time_ms, &preset.eval_options);
        let opts = IterativeOptions { max_nodes: preset.max_nodes, ..opts };
        find_best_move_iterative(board, color, &mut self.tt, &mut self.forbidden_cache, &opts)
    }

    /// As `find_best_move`, but with explicit search options, used by the
    /// review worker to control time budget and tie-break randomization
    /// independently of the three fixed difficulty presets.
    pub fn find_best_move_with_options(&mut self, board: &mut Board, color: Color, opts: &IterativeOptions) -> IterativeResult {
        find_best_move_iterative(board, color, &mut self.tt, &mut self.forbidden_cache, opts)
    }

    /// Builds the principal variation starting at `mv` by walking TT
    /// `bestMove` pointers from the position it produces (spec.md §6's
    /// `ReviewCandidate.principalVariation`). `board` is restored to its
    /// original state before returning. Intended to be called once per root
    /// candidate after `find_best_move` has populated the TT.
    pub fn principal_variation_for(&self, board: &mut Board, mv: Move, color: Color) -> Vec<Move> {
        board.place_in_place(mv, color);
        let tail = extract_pv(board, !color, &self.tt, CANDIDATE_PV_MAX_LEN);
        board.undo_in_place(mv, color);

        let mut full = Vec::with_capacity(tail.len() + 1);
        full.push(mv);
        full.extend_from_slice(tail.as_slice());
        full
    }

    pub fn clear(&mut self) {
        self.tt.clear();
        self.forbidden_cache.clear();
    }

    pub fn tt_stats(&self) -> crate::trasposition::TTStats {
        self.tt.stats()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use renju_core::{init_zobrist_keys, Move};

    #[test]
    fn easy_preset_finds_an_immediate_winning_move() {
        init_zobrist_keys();
        let mut board = Board::new();
        for col in 3..7u8 {
            board.place_in_place(Move::new(7, col), Color::Black);
        }
        let mut engine = Engine::new();
        let result = engine.find_best_move(&mut board, Color::Black, Difficulty::Easy);
        assert!(result.best_move.is_some());
    }

    #[test]
    fn hard_preset_enables_every_evaluation_option() {
        let preset = Difficulty::Hard.preset();
        assert!(preset.eval_options.enable_vct);
        assert!(preset.eval_options.enable_forbidden_trap);
        assert!(preset.eval_options.enable_mise);
    }

    #[test]
    fn engine_clear_resets_transposition_table_stats() {
        init_zobrist_keys();
        let mut board = Board::new();
        board.place_in_place(Move::center(), Color::Black);
        let mut engine = Engine::new();
        let _ = engine.find_best_move(&mut board, Color::White, Difficulty::Easy);
        engine.clear();
        assert_eq!(engine.tt_stats().entries, 0);
    }
}
