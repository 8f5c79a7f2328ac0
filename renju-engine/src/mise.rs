use renju_core::{check_forbidden_move, Board, Color, Move};

use crate::evaluation::{classify_all_axes, is_fake_three, AxisPattern};
use crate::movegen::candidate_cells;
use crate::time::TimeLimiter;
use crate::vcf::{find_defense_square, find_vcf_sequence, VCF_DEFAULT_MAX_DEPTH};

/// Default overall time budget for a Mise-VCF attempt (spec.md §4.12).
pub const MISE_DEFAULT_TIME_MS: u64 = 500;

#[derive(Debug, Clone)]
pub struct MiseResult {
    /// `[mise_move, opponent_defense, vcf_moves...]`.
    pub chain: Vec<Move>,
}

/// A two-step prover (spec.md §4.12): play a quiet setup move `M`, see
/// whether it creates a follow-up four-three the opponent must defend
/// against at some `T`, and if forcing that defense leaves a pure VCF win
/// for `color`, report the whole chain.
pub fn find_mise_vcf(board: &mut Board, color: Color, time_limit_ms: u64) -> Option<MiseResult> {
    let limiter = TimeLimiter::from_millis(time_limit_ms);

    for mise_move in candidate_cells(board) {
        if limiter.expired() {
            return None;
        }
        if color == Color::Black && check_forbidden_move(board, mise_move.row, mise_move.col).is_forbidden {
            continue;
        }

        board.place_in_place(mise_move, color);
        let targets = find_mise_targets(board, color);

        let mut found = None;
        for target in &targets {
            if limiter.expired() {
                break;
            }

            board.place_in_place(*target, !color);
            if let Some(vcf) = find_vcf_sequence(board, color, VCF_DEFAULT_MAX_DEPTH, time_limit_ms) {
                let mut chain = vec![mise_move, *target];
                chain.extend(vcf.sequence);
                found = Some(MiseResult { chain });
            }
            board.undo_in_place(*target, !color);

            if found.is_some() {
                break;
            }
        }

        board.undo_in_place(mise_move, color);

        if found.is_some() {
            return found;
        }
    }

    None
}

/// Squares where the opponent would be forced to defend, found by checking
/// every follow-up cell for `color` that would create a four-three (a four
/// plus a real open/jump three on the same move) — the defense square of
/// that four is the opponent's only reply.
fn find_mise_targets(board: &mut Board, color: Color) -> Vec<Move> {
    let mut targets = Vec::new();

    for mv in candidate_cells(board) {
        if color == Color::Black && check_forbidden_move(board, mv.row, mv.col).is_forbidden {
            continue;
        }

        board.place_in_place(mv, color);
        let axes = classify_all_axes(board, mv.row as i32, mv.col as i32, color);

        let has_four = axes.iter().any(|a| matches!(a.pattern, AxisPattern::OpenFour | AxisPattern::ClosedFour | AxisPattern::JumpFour));
        let has_real_three = axes.iter().any(|a| {
            matches!(a.pattern, AxisPattern::OpenThree | AxisPattern::JumpThree)
                && !is_fake_three(board, mv.row as i32, mv.col as i32, a.axis.0, a.axis.1, color)
        });

        let defense = if has_four && has_real_three { find_defense_square(board, mv, color) } else { None };
        board.undo_in_place(mv, color);

        if let Some(defense) = defense {
            if !targets.contains(&defense) {
                targets.push(defense);
            }
        }
    }

    targets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_is_unchanged_after_a_search() {
        let mut board = Board::new();
        board.place_in_place(Move::center(), Color::White);
        let before = board.clone();
        let _ = find_mise_vcf(&mut board, Color::White, MISE_DEFAULT_TIME_MS);
        assert!(board.snapshot_eq(&before));
    }

    #[test]
    fn quiet_opening_has_no_mise_vcf() {
        let mut board = Board::new();
        board.place_in_place(Move::center(), Color::White);
        assert!(find_mise_vcf(&mut board, Color::White, MISE_DEFAULT_TIME_MS).is_none());
    }
}
