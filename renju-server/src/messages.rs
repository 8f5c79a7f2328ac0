use rocket::http::{ContentType, Status};
use rocket::request::Request;
use rocket::response;
use rocket::response::{Responder, Response};
use rocket::serde::json::serde_json::json;
use rocket::serde::json::Value;
use rocket::serde::{Deserialize, Serialize};

use renju_core::Move;
use renju_engine::{EvalScore, ForcedOutcome, PositionBreakdown};

/// Generic API response with an arbitrary HTTP status code and JSON payload.
pub struct ApiResponse {
    status: Status,
    payload: Value,
}

impl<'r, 'o: 'r> Responder<'r, 'o> for ApiResponse {
    fn respond_to(self, req: &'r Request) -> response::Result<'o> {
        Response::build_from(self.payload.respond_to(req).unwrap())
            .status(self.status)
            .header(ContentType::JSON)
            .ok()
    }
}

impl ApiResponse {
    pub fn bad_request(msg: String) -> Self {
        Self { status: Status::BadRequest, payload: json!({"msg": msg}) }
    }

    pub fn review(review: &ReviewResponse) -> Self {
        Self { status: Status::Ok, payload: json!(review) }
    }
}

/// `POST /review` request body (spec.md §6).
#[derive(Debug, Deserialize)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct ReviewRequest {
    /// Whitespace-separated letter-number moves, e.g. `"H8 I7 G7"`.
    pub move_history: String,
    /// Which ply in `move_history` to evaluate (0-indexed).
    pub move_index: usize,
    /// Whether the reviewed player made the first move of the game.
    pub player_first: bool,
    /// Requests a cheaper, shallower search for a responsive "live" review.
    #[serde(default)]
    pub is_light_eval: bool,
}

/// One scored root candidate (spec.md §6's `ReviewCandidate`): `score` is the
/// cheap single-move static score used for move ordering, `search_score` is
/// the fully-searched root negamax score, `breakdown` feeds the annotation
/// pipeline, and `principal_variation`/`leaf_evaluation` describe where the
/// search thinks the line goes from here.
#[derive(Debug, Serialize)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct CandidateEntry {
    pub position: Move,
    pub score: EvalScore,
    pub search_score: EvalScore,
    pub breakdown: PositionBreakdown,
    pub principal_variation: Vec<Move>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leaf_evaluation: Option<EvalScore>,
}

/// `POST /review` response body (spec.md §6).
#[derive(Debug, Serialize)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct ReviewResponse {
    pub move_index: usize,
    pub best_move: Option<Move>,
    pub best_score: EvalScore,
    pub played_score: EvalScore,
    pub candidates: Vec<CandidateEntry>,
    pub completed_depth: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forced_win_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forced_win_branches: Option<Vec<Vec<Move>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forced_loss_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forced_loss_sequence: Option<Vec<Move>>,
    pub is_light_eval: bool,
}

pub fn forced_outcome_label(outcome: ForcedOutcome) -> &'static str {
    match outcome {
        ForcedOutcome::Vcf => "vcf",
        ForcedOutcome::Vct => "vct",
        ForcedOutcome::Mise => "mise",
    }
}
