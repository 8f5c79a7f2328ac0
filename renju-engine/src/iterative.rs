use std::time::{Duration, Instant};

use rand::Rng;
use renju_core::{check_five, check_forbidden_move, get_key_side_to_move, Board, Color, Move};

use crate::evaluation::{classify_all_axes, is_fake_three, AxisPattern, EvalScore, Evaluation, EvaluationOptions, FIVE};
use crate::forbidden_cache::ForbiddenCache;
use crate::movegen::{candidate_cells, generate_sorted_moves, generate_sorted_moves_cached, GenOptions};
use crate::search::{negamax, HistoryTable, PVLine, SearchContext, SearchStats};
use crate::threat::detect_threats;
use crate::threat_types::ThreatSet;
use crate::time::{dynamic_time_limit_ms, SearchDeadlines};
use crate::trasposition::TTable;
use crate::vcf::{find_four_moves, find_vcf_sequence, VCF_DEFAULT_MAX_DEPTH};
use crate::vct::{find_vct_sequence, VCT_STONE_THRESHOLD};
use crate::mise::{find_mise_vcf, MISE_DEFAULT_TIME_MS};

/// Half-width of the aspiration window the iterative loop opens around the
/// previous depth's score (spec.md §9's Open Question resolution).
const ASPIRATION_WINDOW: EvalScore = 75;

/// A score this much worse than a deep, near-decisive depth triggers the
/// time-pressure fallback (spec.md §4.9 step 10).
const FALLBACK_SCORE_GAP: EvalScore = 1500;
const FALLBACK_SCORE_FLOOR: EvalScore = 2500;

const DEFAULT_ABSOLUTE_TIME_MS: u64 = 10_000;
const OPPONENT_VCF_PROBE_MS: u64 = 100;
const MAX_STATIC_EVAL_COUNT: usize = 24;
const PV_MAX_LEN: usize = 10;

/// Which forcing-sequence prover the pre-search gate resolved the position
/// with, if any (surfaced to the review worker as `forcedWinType`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForcedOutcome {
    Vcf,
    Vct,
    Mise,
}

#[derive(Debug, Clone)]
pub struct DepthRecord {
    pub depth: u8,
    pub score: EvalScore,
    pub best_move: Option<Move>,
}

#[derive(Debug, Clone)]
pub struct IterativeResult {
    pub best_move: Option<Move>,
    pub score: EvalScore,
    pub pv: PVLine,
    pub candidates: Vec<(Move, EvalScore)>,
    pub completed_depth: u8,
    pub interrupted: bool,
    pub elapsed: Duration,
    pub depth_history: Vec<DepthRecord>,
    pub stats: SearchStats,
    pub forced_move: bool,
    pub time_pressure_fallback: bool,
    pub fallback_from_depth: Option<u8>,
    pub forced_win: Option<ForcedOutcome>,
    pub forced_win_branches: Vec<Vec<Move>>,
    pub was_tie_break: bool,
}

/// Parameters the driver takes beyond the board and search tables
/// (spec.md §4.9's `findBestMoveIterativeWithTT` signature).
pub struct IterativeOptions<'a> {
    pub max_depth: u8,
    pub soft_time_ms: u64,
    pub random_factor: f64,
    pub eval_options: &'a EvaluationOptions,
    pub max_nodes: Option<u64>,
    pub absolute_time_ms: u64,
    pub score_threshold: EvalScore,
}

impl<'a> IterativeOptions<'a> {
    pub fn new(max_depth: u8, soft_time_ms: u64, eval_options: &'a EvaluationOptions) -> Self {
        Self {
            max_depth,
            soft_time_ms,
            random_factor: 0.0,
            eval_options,
            max_nodes: None,
            absolute_time_ms: DEFAULT_ABSOLUTE_TIME_MS,
            score_threshold: 200,
        }
    }
}

/// The full iterative-deepening driver (spec.md §4.9): a cheap pre-search
/// gate for immediate wins, forced defenses and forcing-sequence proofs,
/// then an aspiration-windowed depth loop over the (possibly restricted)
/// candidate set, with time-pressure fallback and PV extraction.
pub fn find_best_move_iterative(board: &mut Board, color: Color, tt: &mut TTable, forbidden_cache: &mut ForbiddenCache, opts: &IterativeOptions) -> IterativeResult {
    let start = Instant::now();
    forbidden_cache.clear();
    tt.new_generation();

    let absolute_deadline = start + Duration::from_millis(opts.absolute_time_ms);

    if Instant::now() >= absolute_deadline {
        let fallback = static_top_candidates(board, color, opts.eval_options, 5);
        let (best_move, score) = fallback.first().copied().map(|(m, s)| (Some(m), s)).unwrap_or((None, 0));
        return empty_result(best_move, score, start, true);
    }

    if let Some(mv) = find_winning_move(board, color) {
        return empty_result(Some(mv), FIVE, start, false);
    }

    let opponent_threats = detect_threats(board, !color);
    if let Some((defense, score)) = forced_defense(&opponent_threats) {
        return empty_result(Some(defense), score, start, false);
    }

    if let Some(vcf) = find_vcf_sequence(board, color, VCF_DEFAULT_MAX_DEPTH, 300) {
        let mut result = empty_result(vcf.sequence.first().copied(), FIVE, start, false);
        result.forced_win = Some(ForcedOutcome::Vcf);
        return result;
    }

    let opponent_vcf = find_vcf_sequence(board, !color, VCF_DEFAULT_MAX_DEPTH, OPPONENT_VCF_PROBE_MS);

    if opponent_vcf.is_none() {
        if let Some(mise) = find_mise_vcf(board, color, MISE_DEFAULT_TIME_MS) {
            let mise_move = mise.chain[0];
            let self_forbidden = color == Color::Black && check_forbidden_move(board, mise_move.row, mise_move.col).is_forbidden;
            if !self_forbidden {
                let mut result = empty_result(Some(mise_move), FIVE, start, false);
                result.forced_win = Some(ForcedOutcome::Mise);
                return result;
            }
        }
    }

    let vct_hint_move = if opts.eval_options.enable_vct && board.stone_count() >= VCT_STONE_THRESHOLD {
        find_vct_sequence(board, color, 2, 150, false).and_then(|r| r.sequence.first().copied())
    } else {
        None
    };

    let restricted_moves: Vec<Move> = match &opponent_vcf {
        Some(vcf) => {
            let mut restricted = find_four_moves(board, color);
            if let Some(&threat_cell) = vcf.sequence.first() {
                if !restricted.contains(&threat_cell) {
                    restricted.push(threat_cell);
                }
            }
            restricted
        }
        None => Vec::new(),
    };

    let empty_history = HistoryTable::new();
    let gen_opts = GenOptions {
        tt_move: None,
        killers: &[],
        history: &empty_history,
        color,
        max_static_eval_count: MAX_STATIC_EVAL_COUNT,
        skip_forbidden_check: false,
        opponent_threats: Some(&opponent_threats),
        eval_options: opts.eval_options,
    };
    let generated = generate_sorted_moves_cached(board, &gen_opts, Some(&mut *forbidden_cache));
    let mut candidates: Vec<Move> = generated.iter().map(|r| r.mv).collect();

    if !restricted_moves.is_empty() {
        let restricted_and_present: Vec<Move> = candidates.iter().copied().filter(|m| restricted_moves.contains(m)).collect();
        if !restricted_and_present.is_empty() {
            candidates = restricted_and_present;
        }
    }

    if let Some(hint) = vct_hint_move {
        if !candidates.contains(&hint) {
            candidates.insert(0, hint);
        } else {
            candidates.retain(|&m| m != hint);
            candidates.insert(0, hint);
        }
    }

    if candidates.is_empty() {
        return empty_result(None, 0, start, false);
    }

    let dynamic_limit = dynamic_time_limit_ms(opts.soft_time_ms, board.stone_count(), candidates.len());

    if candidates.len() <= 1 {
        let mut result = empty_result(candidates.first().copied(), 0, start, false);
        result.forced_move = true;
        return result;
    }

    let deadlines = SearchDeadlines::new(start, dynamic_limit, absolute_deadline);

    let mut ctx = SearchContext::new(tt, forbidden_cache, *opts.eval_options, deadlines.soft_deadline, deadlines.absolute_deadline, opts.max_nodes);

    let mut depth_history: Vec<DepthRecord> = Vec::new();
    let mut interrupted = false;

    let (mut last_root, _) = search_root(board, color, 1, &candidates, &mut ctx, Evaluation::min_val(), Evaluation::max_val());
    if let Some(&(best_mv, best_eval)) = last_root.first() {
        depth_history.push(DepthRecord { depth: 1, score: best_eval.score(), best_move: Some(best_mv) });
    }

    let mut completed_depth: u8 = 1;

    for depth in 2..=opts.max_depth {
        let now = Instant::now();
        if deadlines.past_absolute_deadline(now) || deadlines.past_loop_cutoff(now) || ctx.interrupted() {
            interrupted = true;
            break;
        }

        if let Some(&(prev_best, _)) = last_root.first() {
            if let Some(pos) = candidates.iter().position(|&m| m == prev_best) {
                candidates.swap(0, pos);
            }
        }

        let prev_score = last_root.first().map(|&(_, s)| s).unwrap_or(Evaluation::new(0));
        let alpha = prev_score - ASPIRATION_WINDOW;
        let beta = prev_score + ASPIRATION_WINDOW;

        let (mut moves, best_score) = search_root(board, color, depth, &candidates, &mut ctx, alpha, beta);

        if best_score <= alpha || best_score >= beta {
            let (full_moves, full_score) = search_root(board, color, depth, &candidates, &mut ctx, Evaluation::min_val(), Evaluation::max_val());
            moves = full_moves;
            let _ = full_score;
        }

        last_root = moves;
        if let Some(&(best_mv, best_eval)) = last_root.first() {
            depth_history.push(DepthRecord { depth, score: best_eval.score(), best_move: Some(best_mv) });
        }
        completed_depth = depth;

        if ctx.interrupted() {
            interrupted = true;
            break;
        }
    }

    let mut best_move = last_root.first().map(|&(m, _)| m);
    let mut score = last_root.first().map(|&(_, s)| s.score()).unwrap_or(0);
    let candidates_scored: Vec<(Move, EvalScore)> = last_root.iter().map(|&(m, s)| (m, s.score())).collect();

    let mut time_pressure_fallback = false;
    let mut fallback_from_depth = None;

    if interrupted {
        if let Some(best_deep) = depth_history
            .iter()
            .filter(|r| r.score >= FALLBACK_SCORE_FLOOR)
            .filter(|r| r.score as i64 - score as i64 > FALLBACK_SCORE_GAP as i64)
            .max_by_key(|r| r.depth)
        {
            best_move = best_deep.best_move;
            score = best_deep.score;
            fallback_from_depth = Some(best_deep.depth);
            time_pressure_fallback = true;
        }
    }

    let mut was_tie_break = false;
    if opts.random_factor > 0.0 && !candidates_scored.is_empty() {
        let within_threshold: Vec<&(Move, EvalScore)> =
            candidates_scored.iter().filter(|&&(_, s)| (score - s).abs() <= opts.score_threshold).collect();
        let tied: Vec<&(Move, EvalScore)> = candidates_scored.iter().filter(|&&(_, s)| s == score).collect();

        if tied.len() > 1 {
            let pick = tied[rand::thread_rng().gen_range(0..tied.len())];
            best_move = Some(pick.0);
            was_tie_break = true;
        } else if rand::thread_rng().gen_bool(opts.random_factor.clamp(0.0, 1.0)) && within_threshold.len() > 1 {
            let pick = within_threshold[rand::thread_rng().gen_range(0..within_threshold.len())];
            best_move = Some(pick.0);
        }
    }

    let pv = extract_pv(board, color, ctx.tt, PV_MAX_LEN);

    IterativeResult {
        best_move,
        score,
        pv,
        candidates: candidates_scored,
        completed_depth,
        interrupted,
        elapsed: start.elapsed(),
        depth_history,
        stats: ctx.stats,
        forced_move: false,
        time_pressure_fallback,
        fallback_from_depth,
        forced_win: None,
        forced_win_branches: Vec::new(),
        was_tie_break,
    }
}

fn empty_result(best_move: Option<Move>, score: EvalScore, start: Instant, interrupted: bool) -> IterativeResult {
    IterativeResult {
        best_move,
        score,
        pv: PVLine::new(),
        candidates: Vec::new(),
        completed_depth: 0,
        interrupted,
        elapsed: start.elapsed(),
        depth_history: Vec::new(),
        stats: SearchStats::default(),
        forced_move: false,
        time_pressure_fallback: false,
        fallback_from_depth: None,
        forced_win: None,
        forced_win_branches: Vec::new(),
        was_tie_break: false,
    }
}

fn find_winning_move(board: &mut Board, color: Color) -> Option<Move> {
    for mv in candidate_cells(board) {
        if color == Color::Black && check_forbidden_move(board, mv.row, mv.col).is_forbidden {
            board.place_in_place(mv, color);
            let five = check_five(board, mv.row, mv.col, color);
            board.undo_in_place(mv, color);
            if !five {
                continue;
            }
        }
        board.place_in_place(mv, color);
        let five = check_five(board, mv.row, mv.col, color);
        board.undo_in_place(mv, color);
        if five {
            return Some(mv);
        }
    }
    None
}

/// The mandatory defense against the opponent's most urgent existing
/// threat, if any (spec.md §4.9 step 3c): an open four must be blocked at
/// its one square (falling through to normal search if that square is
/// itself forbidden for black); a plain four is blocked at its own cell,
/// scoring `-FIVE` if that same cell is also an open-three defense (a
/// four-three fork no single square can answer).
fn forced_defense(threats: &ThreatSet) -> Option<(Move, EvalScore)> {
    if let Some(&defense) = threats.open_fours.first() {
        return Some((defense, 0));
    }
    if let Some(&defense) = threats.fours.first() {
        let score = if threats.open_three_defenses.contains(&defense) { -FIVE } else { 0 };
        return Some((defense, score));
    }
    None
}

fn static_top_candidates(board: &mut Board, color: Color, eval_options: &EvaluationOptions, n: usize) -> Vec<(Move, EvalScore)> {
    let opponent_threats = detect_threats(board, !color);
    let empty_history = HistoryTable::new();
    let gen_opts = GenOptions {
        tt_move: None,
        killers: &[],
        history: &empty_history,
        color,
        max_static_eval_count: n,
        skip_forbidden_check: false,
        opponent_threats: Some(&opponent_threats),
        eval_options,
    };
    generate_sorted_moves(board, &gen_opts).into_iter().take(n).map(|r| (r.mv, r.score as EvalScore)).collect()
}

/// One level of negamax inlined at the root so every candidate's own score
/// is visible for aspiration re-search decisions and PV extraction (spec.md
/// §4.9's `findBestMoveWithTT`). Returns candidates sorted best-first and
/// the best score found.
fn search_root(
    board: &mut Board,
    color: Color,
    depth: u8,
    candidates: &[Move],
    ctx: &mut SearchContext,
    mut alpha: Evaluation,
    beta: Evaluation,
) -> (Vec<(Move, Evaluation)>, Evaluation) {
    let mut scored = Vec::with_capacity(candidates.len());
    let mut best = Evaluation::min_val();

    for &mv in candidates {
        if ctx.interrupted() {
            break;
        }

        board.place_in_place(mv, color);
        let moved_to_five = check_five(board, mv.row, mv.col, color);
        let score = if depth == 0 {
            Evaluation::new(0)
        } else {
            -negamax(board, !color, depth - 1, -beta, -alpha, 1, true, moved_to_five, ctx)
        };
        board.undo_in_place(mv, color);

        scored.push((mv, score));
        if score > best {
            best = score;
        }
        if score > alpha {
            alpha = score;
        }
    }

    scored.sort_unstable_by(|a, b| b.1.cmp(&a.1));
    (scored, best)
}

/// Walks TT `bestMove` pointers from the root position to build the
/// principal variation (spec.md §4.9's PV extraction), then drops trailing
/// attacker+block pairs where the attacker's move was a plain four with no
/// follow-up open three.
pub(crate) fn extract_pv(root_board: &Board, root_color: Color, tt: &TTable, max_len: usize) -> PVLine {
    let mut pv = PVLine::new();
    let mut replay = root_board.clone();
    let mut color = root_color;

    for _ in 0..max_len {
        let hash = replay.zobrist_key() ^ get_key_side_to_move(color);
        let Some(entry) = tt.probe(hash) else { break };
        let Some(mv) = entry.best_move else { break };
        if !replay.get(mv).is_empty() {
            break;
        }

        let opponent_threats = detect_threats(&replay, !color);
        if !pv_move_satisfies_mandatory_defense(mv, &opponent_threats) {
            break;
        }

        replay.place_in_place(mv, color);
        pv.push(mv);
        color = !color;
    }

    truncate_unproductive_tail(&mut pv, root_board, root_color);
    pv
}

fn pv_move_satisfies_mandatory_defense(mv: Move, threats: &ThreatSet) -> bool {
    if !threats.open_fours.is_empty() {
        return threats.open_fours.contains(&mv);
    }
    if !threats.fours.is_empty() {
        return threats.fours.contains(&mv);
    }
    if !threats.open_three_defenses.is_empty() {
        return threats.open_three_defenses.contains(&mv);
    }
    true
}

fn truncate_unproductive_tail(pv: &mut PVLine, root_board: &Board, root_color: Color) {
    loop {
        if pv.len() < 2 {
            break;
        }

        let moves = pv.as_slice().to_vec();
        let attacker_idx = moves.len() - 2;
        let attacker_mv = moves[attacker_idx];

        let mut board = root_board.clone();
        let mut color = root_color;
        for &mv in &moves[..attacker_idx] {
            board.place_in_place(mv, color);
            color = !color;
        }

        board.place_in_place(attacker_mv, color);
        let axes = classify_all_axes(&board, attacker_mv.row as i32, attacker_mv.col as i32, color);
        let has_four = axes.iter().any(|a| matches!(a.pattern, AxisPattern::OpenFour | AxisPattern::ClosedFour | AxisPattern::JumpFour));
        let has_real_three = axes.iter().any(|a| {
            matches!(a.pattern, AxisPattern::OpenThree | AxisPattern::JumpThree)
                && !is_fake_three(&board, attacker_mv.row as i32, attacker_mv.col as i32, a.axis.0, a.axis.1, color)
        });
        board.undo_in_place(attacker_mv, color);

        if has_four && !has_real_three {
            pv.truncate(attacker_idx);
        } else {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forbidden_cache::ForbiddenCache;
    use crate::trasposition::TTable;
    use renju_core::init_zobrist_keys;

    #[test]
    fn immediate_winning_move_short_circuits_the_whole_search() {
        init_zobrist_keys();
        let mut board = Board::new();
        for col in 3..7u8 {
            board.place_in_place(Move::new(7, col), Color::Black);
        }
        let mut tt = TTable::new(1024);
        let mut cache = ForbiddenCache::new();
        let eval_options = EvaluationOptions::default();
        let opts = IterativeOptions::new(4, 200, &eval_options);

        let result = find_best_move_iterative(&mut board, Color::Black, &mut tt, &mut cache, &opts);
        assert_eq!(result.score, FIVE);
        assert!(result.best_move.is_some());
    }

    #[test]
    fn a_single_legal_candidate_is_returned_as_a_forced_move() {
        init_zobrist_keys();
        // Fill the board almost entirely, leaving one empty cell.
        let mut board = Board::new();
        let mut color = Color::Black;
        for row in 0..15u8 {
            for col in 0..15u8 {
                if row == 14 && col == 14 {
                    continue;
                }
                board.place_in_place(Move::new(row, col), color);
                color = !color;
            }
        }
        let mut tt = TTable::new(64);
        let mut cache = ForbiddenCache::new();
        let eval_options = EvaluationOptions::default();
        let opts = IterativeOptions::new(2, 100, &eval_options);

        let result = find_best_move_iterative(&mut board, color, &mut tt, &mut cache, &opts);
        assert_eq!(result.best_move, Some(Move::new(14, 14)));
    }

    #[test]
    fn board_is_unchanged_after_a_full_search() {
        init_zobrist_keys();
        let mut board = Board::new();
        board.place_in_place(Move::center(), Color::Black);
        board.place_in_place(Move::new(7, 8), Color::White);
        let before = board.clone();
        let mut tt = TTable::new(4096);
        let mut cache = ForbiddenCache::new();
        let eval_options = EvaluationOptions::default();
        let opts = IterativeOptions::new(3, 300, &eval_options);

        let _ = find_best_move_iterative(&mut board, Color::Black, &mut tt, &mut cache, &opts);
        assert!(board.snapshot_eq(&before));
    }
}
