use renju_core::{check_forbidden_move, Board, Color, Move, BOARD_SIZE};

use crate::evaluation::{evaluate_move, EvaluationOptions};
use crate::forbidden_cache::{check_forbidden_move_with_cache, ForbiddenCache};
use crate::search::HistoryTable;
use crate::threat_types::ThreatSet;

/// Integer ordering score for a candidate move (spec.md §3's "Candidate
/// entry"). Wide enough to hold the `+1_000_000` TT bonus stacked on top of
/// a static-eval term that itself reaches into the hundred-thousands.
pub type OrderScore = i64;

const TT_MOVE_BONUS: OrderScore = 1_000_000;
const KILLER_BASE: OrderScore = 100_000;
const KILLER_STEP: OrderScore = 10_000;
const MAX_KILLERS: usize = 2;

/// Sentinel ordering score for a mandatory-defense violation; such moves are
/// filtered out of `generate_sorted_moves` unless filtering would empty the
/// list entirely.
pub const FORBIDDEN_ORDER_SCORE: OrderScore = OrderScore::MIN / 4;

pub struct RatedMove {
    pub mv: Move,
    pub score: OrderScore,
}

/// Parameters threaded through `generate_sorted_moves` (spec.md §4.5).
pub struct GenOptions<'a> {
    pub tt_move: Option<Move>,
    pub killers: &'a [Move],
    pub history: &'a HistoryTable,
    pub color: Color,
    pub max_static_eval_count: usize,
    pub skip_forbidden_check: bool,
    pub opponent_threats: Option<&'a ThreatSet>,
    pub eval_options: &'a EvaluationOptions,
}

/// All empty cells within Chebyshev distance 2 of any stone. Returns the
/// center move on an empty board (spec.md §4.5).
pub fn candidate_cells(board: &Board) -> Vec<Move> {
    if board.is_empty_board() {
        return vec![Move::center()];
    }

    let mut out = Vec::new();
    for row in 0..BOARD_SIZE as i32 {
        for col in 0..BOARD_SIZE as i32 {
            if board.get_rc(row, col).is_empty() && board.has_neighbor_within(row, col, 2) {
                out.push(Move::new(row as u8, col as u8));
            }
        }
    }
    out
}

pub fn generate_moves(board: &Board, _color: Color) -> Vec<Move> {
    candidate_cells(board)
}

/// Generates and orders moves per spec.md §4.5: drops black-forbidden moves
/// (unless `skip_forbidden_check`, or the move completes a five), scores by
/// (TT-move, killer, history, static eval), and filters mandatory-defense
/// violations unless doing so would empty the list.
pub fn generate_sorted_moves(board: &mut Board, opts: &GenOptions) -> Vec<RatedMove> {
    generate_sorted_moves_cached(board, opts, None)
}

/// As [`generate_sorted_moves`], but routes the black-forbidden check
/// through the per-hash [`ForbiddenCache`] (spec.md §4.7) when the caller
/// has one handy — the recursive search does, the pre-search gate doesn't.
pub fn generate_sorted_moves_cached(board: &mut Board, opts: &GenOptions, mut cache: Option<&mut ForbiddenCache>) -> Vec<RatedMove> {
    let mut candidates = candidate_cells(board);

    if opts.color == Color::Black && !opts.skip_forbidden_check {
        let hash = board.zobrist_key();
        candidates.retain(|&mv| {
            let result = match cache.as_deref_mut() {
                Some(cache) => check_forbidden_move_with_cache(cache, board, mv.row, mv.col, hash),
                None => check_forbidden_move(board, mv.row, mv.col),
            };
            !result.is_forbidden || completes_five(board, mv, opts.color)
        });
    }

    // Pre-sort by the cheap, non-static components so the static eval is
    // only spent on the most promising `max_static_eval_count` candidates.
    let mut rated: Vec<RatedMove> = candidates
        .into_iter()
        .map(|mv| RatedMove { mv, score: cheap_score(mv, opts) })
        .collect();
    rated.sort_unstable_by(|a, b| b.score.cmp(&a.score));

    let static_eval_count = opts.max_static_eval_count.min(rated.len());
    for rated_move in rated.iter_mut().take(static_eval_count) {
        board.place_in_place(rated_move.mv, opts.color);
        let static_score = evaluate_move(board, rated_move.mv, opts.color, opts.opponent_threats, opts.eval_options);
        board.undo_in_place(rated_move.mv, opts.color);

        rated_move.score = if static_score <= crate::evaluation::MANDATORY_DEFENSE_PENALTY {
            FORBIDDEN_ORDER_SCORE
        } else {
            rated_move.score + static_score as OrderScore
        };
    }

    rated.sort_unstable_by(|a, b| b.score.cmp(&a.score));

    let filtered: Vec<RatedMove> = rated.iter().filter(|r| r.score > FORBIDDEN_ORDER_SCORE).map(|r| RatedMove { mv: r.mv, score: r.score }).collect();
    if filtered.is_empty() {
        rated
    } else {
        filtered
    }
}

fn completes_five(board: &Board, mv: Move, color: Color) -> bool {
    let mut probe = board.clone();
    probe.place_in_place(mv, color);
    let is_five = renju_core::check_five(&probe, mv.row, mv.col, color);
    probe.undo_in_place(mv, color);
    is_five
}

fn cheap_score(mv: Move, opts: &GenOptions) -> OrderScore {
    if Some(mv) == opts.tt_move {
        return TT_MOVE_BONUS;
    }

    for (rank, &killer) in opts.killers.iter().take(MAX_KILLERS).enumerate() {
        if killer == mv {
            return KILLER_BASE - KILLER_STEP * rank as OrderScore;
        }
    }

    opts.history.get_value(mv, opts.color)
}
