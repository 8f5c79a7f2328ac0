use renju_core::{check_five, Board, Color, Move};

use crate::evaluation::{classify_all_axes, evaluate_position, AxisPattern, EvalScore, Evaluation, FIVE};
use crate::movegen::{generate_sorted_moves_cached, GenOptions, OrderScore};
use crate::threat::detect_threats;
use crate::trasposition::Bound;

use super::context::SearchContext;

/// Depth reduction applied by null-move pruning (spec.md §4.8 step 5):
/// the recursive probe runs at `depth - 1 - NULL_MOVE_REDUCTION`.
const NULL_MOVE_REDUCTION: u8 = 2;
const NULL_MOVE_MIN_DEPTH: u8 = 3;

const LMR_MIN_MOVE_INDEX: usize = 3;
const LMR_MIN_DEPTH: u8 = 3;
/// A reduced search is only trusted (no re-search) above this floor, so LMR
/// never quietly hides a near-loss (spec.md §4.8 step 7).
const LMR_SCORE_FLOOR: EvalScore = -FIVE + 1000;

const FUTILITY_MIN_DEPTH: u8 = 1;
const FUTILITY_MAX_DEPTH: u8 = 3;
/// Indexed by depth (1..=3); index 0 is unused filler. Classic negamax has
/// no distinct minimizing node, so the "self vs opponent" margin split
/// spec.md §4.8 describes for the maximizing/minimizing formulation
/// collapses to this single table here.
const FUTILITY_MARGINS: [EvalScore; 4] = [0, 150, 280, 420];

/// How close to a forced win/loss a window has to be before futility
/// pruning and null-move pruning back off, so neither ever prunes away a
/// near-decisive line.
const NEAR_DECISIVE_MARGIN: EvalScore = 5000;

const MAX_STATIC_EVAL_COUNT: usize = 24;

fn is_near_decisive(alpha: Evaluation, beta: Evaluation) -> bool {
    alpha.score() <= -FIVE + NEAR_DECISIVE_MARGIN || beta.score() >= FIVE - NEAR_DECISIVE_MARGIN
}

/// Whether placing `color` at `mv` creates anything beyond a two-in-a-row
/// on any axis, used to exempt tactical moves from futility pruning.
fn is_tactical_move(board: &mut Board, mv: Move, color: Color) -> bool {
    board.place_in_place(mv, color);
    let axes = classify_all_axes(board, mv.row as i32, mv.col as i32, color);
    board.undo_in_place(mv, color);
    axes.iter().any(|a| !matches!(a.pattern, AxisPattern::None | AxisPattern::OpenTwo | AxisPattern::ClosedTwo))
}

/// Negamax with alpha-beta pruning, TT probing, null-move pruning, late
/// move reductions and futility pruning (spec.md §4.8). The returned
/// [`Evaluation`] is always relative to `color`, the side to move at this
/// node — classic negamax convention, arithmetically equivalent to the
/// explicit `isMaximizing`/`perspective` formulation the algorithm is
/// described with.
///
/// `last_move_five` is whether the move that produced `board` (played by
/// `!color`) completed a five; the caller computes this once rather than
/// re-deriving it here.
#[allow(clippy::too_many_arguments)]
pub fn negamax(
    board: &mut Board,
    color: Color,
    depth: u8,
    mut alpha: Evaluation,
    mut beta: Evaluation,
    ply: u32,
    allow_null_move: bool,
    last_move_five: bool,
    ctx: &mut SearchContext,
) -> Evaluation {
    ctx.enter_node();
    if ctx.interrupted() {
        ctx.stats.eval_calls += 1;
        return evaluate_position(board, color, &ctx.eval_options);
    }

    if last_move_five {
        return Evaluation::new(-FIVE);
    }

    let hash = board.zobrist_key() ^ renju_core::get_key_side_to_move(color);
    let orig_alpha = alpha;
    let mut tt_move: Option<Move> = None;

    if let Some(entry) = ctx.tt.probe(hash) {
        ctx.stats.tt_hits += 1;
        tt_move = entry.best_move;

        if entry.depth >= depth {
            match entry.bound {
                Bound::Exact => return Evaluation::new(entry.score),
                Bound::LowerBound => alpha = alpha.max(Evaluation::new(entry.score)),
                Bound::UpperBound => beta = beta.min(Evaluation::new(entry.score)),
            }
            if alpha >= beta {
                ctx.stats.tt_cutoffs += 1;
                return Evaluation::new(entry.score);
            }
        }
    }

    if depth == 0 {
        ctx.stats.eval_calls += 1;
        let eval = evaluate_position(board, color, &ctx.eval_options);
        ctx.tt.store(hash, eval.score(), 0, Bound::Exact, None);
        return eval;
    }

    ctx.stats.threat_checks += 1;
    let opponent_threats = detect_threats(board, !color);

    if ctx.eval_options.enable_null_move_pruning
        && allow_null_move
        && depth >= NULL_MOVE_MIN_DEPTH
        && !is_near_decisive(alpha, beta)
        && opponent_threats.open_fours.is_empty()
        && opponent_threats.fours.is_empty()
    {
        let reduced_depth = depth.saturating_sub(1 + NULL_MOVE_REDUCTION);
        let null_score = -negamax(board, !color, reduced_depth, -beta, -beta + 1, ply + 1, false, false, ctx);
        if null_score >= beta {
            ctx.stats.null_move_cutoffs += 1;
            return null_score;
        }
    }

    let killers = ctx.killers.at(ply as usize);
    let gen_opts = GenOptions {
        tt_move,
        killers: &killers,
        history: &ctx.history,
        color,
        max_static_eval_count: MAX_STATIC_EVAL_COUNT,
        skip_forbidden_check: false,
        opponent_threats: Some(&opponent_threats),
        eval_options: &ctx.eval_options,
    };
    let moves = generate_sorted_moves_cached(board, &gen_opts, Some(&mut *ctx.forbidden_cache));

    if moves.is_empty() {
        return Evaluation::new(0);
    }

    let static_eval = if ctx.eval_options.enable_futility_pruning && depth >= FUTILITY_MIN_DEPTH && depth <= FUTILITY_MAX_DEPTH {
        ctx.stats.eval_calls += 1;
        Some(evaluate_position(board, color, &ctx.eval_options))
    } else {
        None
    };

    let mut best_score = Evaluation::min_val();
    let mut best_move: Option<Move> = None;
    let mut bound = Bound::UpperBound;

    for (move_index, rated) in moves.iter().enumerate() {
        let mv = rated.mv;

        if let Some(static_eval) = static_eval {
            if move_index > 0 && !is_near_decisive(alpha, beta) && !is_tactical_move(board, mv, color) {
                let margin = FUTILITY_MARGINS[depth as usize];
                if static_eval.score() + margin <= alpha.score() {
                    ctx.stats.futility_prunes += 1;
                    continue;
                }
            }
        }

        board.place_in_place(mv, color);
        let moved_to_five = check_five(board, mv.row, mv.col, color);

        let lmr_eligible =
            move_index >= LMR_MIN_MOVE_INDEX && depth >= LMR_MIN_DEPTH && best_score.score() > LMR_SCORE_FLOOR;

        let score = if lmr_eligible {
            let reduced = -negamax(board, !color, depth - 2, -beta, -alpha, ply + 1, true, moved_to_five, ctx);
            if reduced > alpha {
                -negamax(board, !color, depth - 1, -beta, -alpha, ply + 1, true, moved_to_five, ctx)
            } else {
                reduced
            }
        } else {
            -negamax(board, !color, depth - 1, -beta, -alpha, ply + 1, true, moved_to_five, ctx)
        };

        board.undo_in_place(mv, color);

        if score > best_score {
            best_score = score;
            best_move = Some(mv);
        }
        if score > alpha {
            alpha = score;
        }
        if alpha >= beta {
            ctx.stats.beta_cutoffs += 1;
            ctx.killers.push(ply as usize, mv);
            ctx.history.add_bonus(mv, color, (depth as OrderScore) * (depth as OrderScore));
            bound = Bound::LowerBound;
            break;
        }
    }

    if bound != Bound::LowerBound {
        bound = if best_score <= orig_alpha { Bound::UpperBound } else { Bound::Exact };
    }

    ctx.tt.store(hash, best_score.score(), depth, bound, best_move);
    best_score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::EvaluationOptions;
    use crate::forbidden_cache::ForbiddenCache;
    use crate::trasposition::TTable;
    use renju_core::init_zobrist_keys;
    use std::time::{Duration, Instant};

    fn fresh_ctx<'a>(tt: &'a mut TTable, cache: &'a mut ForbiddenCache) -> SearchContext<'a> {
        init_zobrist_keys();
        let now = Instant::now();
        SearchContext::new(
            tt,
            cache,
            EvaluationOptions::default(),
            now + Duration::from_secs(5),
            now + Duration::from_secs(5),
            None,
        )
    }

    #[test]
    fn depth_zero_returns_static_eval_and_stores_exact() {
        let mut board = Board::new();
        board.place_in_place(Move::center(), Color::Black);
        let mut tt = TTable::new(64);
        let mut cache = ForbiddenCache::new();
        let mut ctx = fresh_ctx(&mut tt, &mut cache);

        let eval = negamax(&mut board, Color::White, 0, Evaluation::min_val(), Evaluation::max_val(), 0, true, false, &mut ctx);
        assert_eq!(eval.score(), evaluate_position(&board, Color::White, &ctx.eval_options).score());
    }

    #[test]
    fn finds_the_winning_move_one_ply_deep() {
        // Black has four in a row open on one end; White to move cannot stop
        // five next ply, so White's best score at depth 1 must reflect that
        // it is losing (a large negative score from White's perspective).
        let mut board = Board::new();
        for col in 3..7u8 {
            board.place_in_place(Move::new(7, col), Color::Black);
        }
        let mut tt = TTable::new(1024);
        let mut cache = ForbiddenCache::new();
        let mut ctx = fresh_ctx(&mut tt, &mut cache);

        let eval = negamax(&mut board, Color::White, 1, Evaluation::min_val(), Evaluation::max_val(), 0, true, false, &mut ctx);
        assert!(eval.score() < 0);
    }

    #[test]
    fn last_move_five_short_circuits_to_a_loss() {
        let mut board = Board::new();
        for col in 3..8u8 {
            board.place_in_place(Move::new(7, col), Color::Black);
        }
        let mut tt = TTable::new(64);
        let mut cache = ForbiddenCache::new();
        let mut ctx = fresh_ctx(&mut tt, &mut cache);

        let eval = negamax(&mut board, Color::White, 4, Evaluation::min_val(), Evaluation::max_val(), 0, true, true, &mut ctx);
        assert_eq!(eval.score(), -FIVE);
    }
}
