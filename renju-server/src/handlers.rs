use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Mutex;

use rocket::serde::json::Json;
use rocket::{Route, State};

use renju_core::{Board, Color, Move};
use renju_engine::{
    evaluate_move, evaluate_position, evaluate_position_breakdown, find_vcf_sequence, Difficulty, EvalScore,
    IterativeResult, VCF_DEFAULT_MAX_DEPTH,
};

use crate::messages::{forced_outcome_label, ApiResponse, CandidateEntry, ReviewRequest, ReviewResponse};
use crate::notation::parse_move_history;
use crate::state::ServerState;

type StateMutex = State<Mutex<ServerState>>;

/// Time budget for the opponent-VCF probe that backs `forcedLossType`
/// (spec.md §6); short, since it only needs to answer "is this lost" for
/// the reported line, not prove the shortest possible mate.
const FORCED_LOSS_PROBE_MS: u64 = 200;

pub fn get_routes() -> Vec<Route> {
    routes![review]
}

#[post("/review", data = "<request>")]
pub fn review(state: &StateMutex, request: Json<ReviewRequest>) -> ApiResponse {
    let moves = match parse_move_history(&request.move_history) {
        Ok(moves) => moves,
        Err(err) => return ApiResponse::bad_request(err.to_string()),
    };

    if request.move_index > moves.len() {
        return ApiResponse::bad_request(format!("moveIndex {} is past the end of the supplied history", request.move_index));
    }

    let first_color = if request.player_first { Color::Black } else { Color::White };
    let color_to_move = if request.move_index % 2 == 0 { first_color } else { !first_color };
    let played_move = moves.get(request.move_index).copied();

    let mut state_lock = state.inner().lock().unwrap();
    let difficulty = if request.is_light_eval { Difficulty::Easy } else { Difficulty::Hard };

    let outcome = catch_unwind(AssertUnwindSafe(|| {
        run_review(&mut state_lock, &moves[..request.move_index], color_to_move, first_color, played_move, difficulty)
    }));

    match outcome {
        Ok(Ok(response)) => ApiResponse::review(&response),
        Ok(Err(err)) => ApiResponse::bad_request(err.to_string()),
        Err(_) => {
            tracing::error!("review handler panicked; returning safe default");
            ApiResponse::review(&safe_default_response(request.move_index, request.is_light_eval))
        }
    }
}

fn run_review(
    state: &mut ServerState,
    history_prefix: &[Move],
    color_to_move: Color,
    first_color: Color,
    played_move: Option<Move>,
    difficulty: Difficulty,
) -> Result<ReviewResponse, renju_core::RenjuError> {
    let mut board = Board::from_moves(history_prefix, first_color)?;
    let eval_options = difficulty.preset().eval_options;

    let result: IterativeResult = state.engine_mut().find_best_move(&mut board, color_to_move, difficulty);
    let played_score = played_move
        .and_then(|mv| result.candidates.iter().find(|&&(c, _)| c == mv).map(|&(_, s)| s))
        .unwrap_or(result.score);

    let forced_loss = find_vcf_sequence(&mut board, !color_to_move, VCF_DEFAULT_MAX_DEPTH, FORCED_LOSS_PROBE_MS);

    let mut candidates = Vec::with_capacity(result.candidates.len());
    for (mv, search_score) in result.candidates {
        candidates.push(build_candidate(state, &mut board, mv, search_score, color_to_move, &eval_options));
    }

    Ok(ReviewResponse {
        move_index: history_prefix.len(),
        best_move: result.best_move,
        best_score: result.score,
        played_score,
        candidates,
        completed_depth: result.completed_depth,
        forced_win_type: result.forced_win.map(forced_outcome_label),
        forced_win_branches: if result.forced_win_branches.is_empty() { None } else { Some(result.forced_win_branches) },
        forced_loss_type: forced_loss.as_ref().map(|_| "vcf"),
        forced_loss_sequence: forced_loss.map(|vcf| vcf.sequence),
        is_light_eval: difficulty == Difficulty::Easy,
    })
}

/// Builds one `ReviewCandidate` (spec.md §6): the cheap static `score` and
/// the annotation `breakdown` both come from the position right after `mv`;
/// `principal_variation` walks the TT the main search just populated, and
/// `leaf_evaluation` is the static score at wherever that line bottoms out.
fn build_candidate(
    state: &mut ServerState,
    board: &mut Board,
    mv: Move,
    search_score: EvalScore,
    color_to_move: Color,
    eval_options: &renju_engine::EvaluationOptions,
) -> CandidateEntry {
    board.place_in_place(mv, color_to_move);
    let score = evaluate_move(board, mv, color_to_move, None, eval_options);
    let breakdown = evaluate_position_breakdown(board, color_to_move, eval_options);
    board.undo_in_place(mv, color_to_move);

    let principal_variation = state.engine_mut().principal_variation_for(board, mv, color_to_move);
    let leaf_evaluation = Some(leaf_evaluation_score(board, &principal_variation, color_to_move, eval_options));

    CandidateEntry { position: mv, score, search_score, breakdown, principal_variation, leaf_evaluation }
}

/// Replays `pv` from `board` (which is left unchanged) and statically
/// evaluates the resulting position from `color_to_move`'s perspective.
fn leaf_evaluation_score(board: &Board, pv: &[Move], color_to_move: Color, eval_options: &renju_engine::EvaluationOptions) -> EvalScore {
    let mut replay = board.clone();
    let mut color = color_to_move;
    for &mv in pv {
        replay.place_in_place(mv, color);
        color = !color;
    }
    evaluate_position(&replay, color_to_move, eval_options).score()
}

fn safe_default_response(move_index: usize, is_light_eval: bool) -> ReviewResponse {
    ReviewResponse {
        move_index,
        best_move: Some(Move::center()),
        best_score: 0,
        played_score: 0,
        candidates: Vec::new(),
        completed_depth: 0,
        forced_win_type: None,
        forced_win_branches: None,
        forced_loss_type: None,
        forced_loss_sequence: None,
        is_light_eval,
    }
}
