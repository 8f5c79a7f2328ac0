use renju_core::{check_five, check_forbidden_move, find_jump_gap, run_end_cells, Board, Color, Move};

use crate::evaluation::{classify_all_axes, AxisPattern, PatternBreakdown};
use crate::movegen::candidate_cells;
use crate::time::TimeLimiter;

/// Default iterative-deepening depth for a normal VCF search; the review
/// worker extends this for a more exhaustive proof (spec.md §4.10).
pub const VCF_DEFAULT_MAX_DEPTH: u8 = 8;
pub const VCF_REVIEW_MAX_DEPTH: u8 = 16;

/// A found forcing sequence that ends in five-in-a-row for the attacker.
/// `sequence` alternates attacker/defender moves starting with the
/// attacker; when the attacker wins on an open four or double four there is
/// no forced defender reply and the sequence ends on the attacker's move.
#[derive(Debug, Clone)]
pub struct VcfResult {
    pub sequence: Vec<Move>,
    pub is_forbidden_trap: bool,
}

/// Runs iterative deepening over `findVCFMoveRecursive` so the *shortest*
/// winning sequence is returned (spec.md §4.10), bounded by `max_depth`
/// plies and `time_limit_ms` of wall-clock time.
pub fn find_vcf_sequence(board: &mut Board, color: Color, max_depth: u8, time_limit_ms: u64) -> Option<VcfResult> {
    let limiter = TimeLimiter::from_millis(time_limit_ms);

    for depth in 1..=max_depth {
        if limiter.expired() {
            return None;
        }
        if let Some((sequence, is_forbidden_trap)) = find_vcf_move_recursive(board, color, depth, &limiter) {
            return Some(VcfResult { sequence, is_forbidden_trap });
        }
    }
    None
}

fn find_vcf_move_recursive(board: &mut Board, color: Color, depth_remaining: u8, limiter: &TimeLimiter) -> Option<(Vec<Move>, bool)> {
    if depth_remaining == 0 || limiter.expired() {
        return None;
    }

    for mv in find_four_moves(board, color) {
        board.place_in_place(mv, color);
        let result = resolve_four_move(board, mv, color, depth_remaining, limiter);
        board.undo_in_place(mv, color);

        if result.is_some() {
            return result;
        }
    }

    None
}

fn resolve_four_move(board: &mut Board, mv: Move, color: Color, depth_remaining: u8, limiter: &TimeLimiter) -> Option<(Vec<Move>, bool)> {
    if check_five(board, mv.row, mv.col, color) {
        return Some((vec![mv], false));
    }

    let defense = find_defense_square(board, mv, color);

    let Some(defense_mv) = defense else {
        // Open four, or a double four with no single stopping square: win.
        return Some((vec![mv], false));
    };

    if color == Color::White && check_forbidden_move(board, defense_mv.row, defense_mv.col).is_forbidden {
        return Some((vec![mv], true));
    }

    board.place_in_place(defense_mv, !color);
    let defender_wins_by_five = check_five(board, defense_mv.row, defense_mv.col, !color);
    let defender_counter_four = !defender_wins_by_five && creates_four(board, defense_mv, !color);

    let sub = if defender_wins_by_five || defender_counter_four {
        None
    } else {
        find_vcf_move_recursive(board, color, depth_remaining - 1, limiter).map(|(tail, trap)| {
            let mut full = vec![mv, defense_mv];
            full.extend(tail);
            (full, trap)
        })
    };

    board.undo_in_place(defense_mv, !color);
    sub
}

/// Every empty cell adjacent to a stone which, when `color` plays there,
/// creates at least one four (consecutive or jump). Black-forbidden cells
/// are dropped unless the move itself completes five.
pub(crate) fn find_four_moves(board: &mut Board, color: Color) -> Vec<Move> {
    let mut out = Vec::new();

    for mv in candidate_cells(board) {
        if color == Color::Black && check_forbidden_move(board, mv.row, mv.col).is_forbidden {
            board.place_in_place(mv, color);
            let completes_five = check_five(board, mv.row, mv.col, color);
            board.undo_in_place(mv, color);
            if !completes_five {
                continue;
            }
        }

        board.place_in_place(mv, color);
        let has_four = creates_four(board, mv, color);
        board.undo_in_place(mv, color);

        if has_four {
            out.push(mv);
        }
    }

    out
}

pub(crate) fn creates_four(board: &Board, mv: Move, color: Color) -> bool {
    classify_all_axes(board, mv.row as i32, mv.col as i32, color)
        .iter()
        .any(|a| matches!(a.pattern, AxisPattern::OpenFour | AxisPattern::ClosedFour | AxisPattern::JumpFour))
}

/// The opponent's unique defense square against the four at `mv`: the single
/// empty end of a closed four, or the gap of a jump four. Returns `None` for
/// an open four (no defense exists) or a double four (no single square
/// stops both), both of which are outright wins for the attacker.
pub(crate) fn find_defense_square(board: &Board, mv: Move, color: Color) -> Option<Move> {
    let axes = classify_all_axes(board, mv.row as i32, mv.col as i32, color);
    let four_axes: Vec<&PatternBreakdown> =
        axes.iter().filter(|a| matches!(a.pattern, AxisPattern::OpenFour | AxisPattern::ClosedFour | AxisPattern::JumpFour)).collect();

    if four_axes.iter().any(|a| a.pattern == AxisPattern::OpenFour) || four_axes.len() != 1 {
        return None;
    }

    let axis = four_axes[0];
    match axis.pattern {
        AxisPattern::ClosedFour => {
            let (end1, end2) = run_end_cells(board, mv.row as i32, mv.col as i32, axis.axis.0, axis.axis.1, color);
            [end1, end2]
                .into_iter()
                .find(|&(r, c)| Board::is_valid_position(r, c) && board.get_rc(r, c).is_empty())
                .map(|(r, c)| Move::new(r as u8, c as u8))
        }
        AxisPattern::JumpFour => find_jump_gap(board, mv.row as i32, mv.col as i32, axis.axis.0, axis.axis.1, color, 4),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_four_is_an_immediate_win_with_no_defense() {
        let mut board = Board::new();
        for col in 4..8u8 {
            board.place_in_place(Move::new(7, col), Color::White);
        }
        let result = find_vcf_sequence(&mut board, Color::White, VCF_DEFAULT_MAX_DEPTH, 1000);
        let result = result.expect("an open four should win via VCF");
        assert_eq!(result.sequence.len(), 1);
    }

    #[test]
    fn no_fours_means_no_vcf() {
        let mut board = Board::new();
        board.place_in_place(Move::center(), Color::White);
        assert!(find_vcf_sequence(&mut board, Color::White, VCF_DEFAULT_MAX_DEPTH, 1000).is_none());
    }

    #[test]
    fn board_is_unchanged_after_a_successful_search() {
        let mut board = Board::new();
        for col in 4..8u8 {
            board.place_in_place(Move::new(7, col), Color::White);
        }
        let before = board.clone();
        let _ = find_vcf_sequence(&mut board, Color::White, VCF_DEFAULT_MAX_DEPTH, 1000);
        assert!(board.snapshot_eq(&before));
    }
}
