use renju_core::{check_five, check_forbidden_move, run_end_cells, Board, Color, Move};

use crate::evaluation::{classify_all_axes, is_fake_three, AxisPattern, PatternBreakdown};
use crate::movegen::candidate_cells;
use crate::threat::detect_threats;
use crate::time::TimeLimiter;
use crate::vcf::{creates_four, find_defense_square, find_four_moves, find_vcf_sequence, VCF_DEFAULT_MAX_DEPTH};

pub const VCT_DEFAULT_MAX_DEPTH: u8 = 4;
pub const VCT_REVIEW_MAX_DEPTH: u8 = 6;

/// Stone count at which the iterative deepening driver starts considering a
/// VCT probe at all (spec.md §9's Open Question resolution).
pub const VCT_STONE_THRESHOLD: u16 = 14;

/// One alternative, shorter defender reply to the main line's attacker move
/// at `defense_index`, collected when `collect_branches` is set.
#[derive(Debug, Clone)]
pub struct VctBranch {
    pub defense_index: usize,
    pub continuation: Vec<Move>,
}

#[derive(Debug, Clone)]
pub struct VctResult {
    pub sequence: Vec<Move>,
    pub branches: Vec<VctBranch>,
}

/// Proves a victory by continuation of threats (spec.md §4.11): every
/// attacker move must either win outright or force every legal defender
/// reply into a position from which the attacker still wins.
pub fn find_vct_sequence(board: &mut Board, color: Color, max_depth: u8, time_limit_ms: u64, collect_branches: bool) -> Option<VctResult> {
    let limiter = TimeLimiter::from_millis(time_limit_ms);

    if let Some(vcf) = find_vcf_sequence(board, color, VCF_DEFAULT_MAX_DEPTH, time_limit_ms.min(200)) {
        return Some(VctResult { sequence: vcf.sequence, branches: Vec::new() });
    }

    // Only VCF can win against a side already holding an immediate
    // open-three threat; a VCT attempt here would be unsound.
    if !detect_threats(board, !color).open_three_defenses.is_empty() {
        return None;
    }

    find_vct_move_recursive(board, color, max_depth, &limiter, collect_branches)
}

fn find_vct_move_recursive(board: &mut Board, color: Color, depth_remaining: u8, limiter: &TimeLimiter, collect_branches: bool) -> Option<VctResult> {
    if depth_remaining == 0 || limiter.expired() {
        return None;
    }

    for mv in find_threat_moves(board, color) {
        board.place_in_place(mv, color);
        let result = resolve_threat_move(board, mv, color, depth_remaining, limiter, collect_branches);
        board.undo_in_place(mv, color);

        if let Some(result) = result {
            return Some(result);
        }
    }

    None
}

fn resolve_threat_move(
    board: &mut Board,
    mv: Move,
    color: Color,
    depth_remaining: u8,
    limiter: &TimeLimiter,
    collect_branches: bool,
) -> Option<VctResult> {
    if check_five(board, mv.row, mv.col, color) {
        return Some(VctResult { sequence: vec![mv], branches: Vec::new() });
    }

    let defenses = get_threat_defense_positions(board, mv, color);
    if defenses.is_empty() {
        // An open/double four, or a fake three that offers no real defense:
        // the attacker wins this branch outright.
        return Some(VctResult { sequence: vec![mv], branches: Vec::new() });
    }

    let mut continuations: Vec<(Move, Vec<Move>)> = Vec::new();

    for defense_mv in defenses {
        if color == Color::White && check_forbidden_move(board, defense_mv.row, defense_mv.col).is_forbidden {
            // Black cannot legally play this defense; the attacker wins by
            // default on this branch, contributing no continuation.
            continue;
        }

        board.place_in_place(defense_mv, !color);
        let defender_wins_by_five = check_five(board, defense_mv.row, defense_mv.col, !color);

        let sub = if defender_wins_by_five {
            None
        } else {
            find_vct_move_recursive(board, color, depth_remaining - 1, limiter, collect_branches)
        };

        board.undo_in_place(defense_mv, !color);

        match sub {
            None => return None, // this defense refutes the attacker move
            Some(result) => {
                let mut full = vec![mv, defense_mv];
                full.extend(result.sequence);
                continuations.push((defense_mv, full));
            }
        }
    }

    if continuations.is_empty() {
        return Some(VctResult { sequence: vec![mv], branches: Vec::new() });
    }

    // The reported PV follows the defender's longest (strongest)
    // continuation; the rest become branches off it (spec.md §4.11 step 4).
    continuations.sort_by_key(|(_, seq)| std::cmp::Reverse(seq.len()));
    let (_, main_seq) = continuations.remove(0);

    let branches = if collect_branches {
        continuations
            .into_iter()
            .enumerate()
            .map(|(i, (_, seq))| VctBranch { defense_index: i, continuation: seq })
            .collect()
    } else {
        Vec::new()
    };

    Some(VctResult { sequence: main_seq, branches })
}

/// Every candidate cell where `color` can create a four or a real
/// (non-fake) open three.
fn find_threat_moves(board: &mut Board, color: Color) -> Vec<Move> {
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
        let axes = classify_all_axes(board, mv.row as i32, mv.col as i32, color);
        let is_threat = creates_four(board, mv, color)
            || axes.iter().any(|a| {
                matches!(a.pattern, AxisPattern::OpenThree | AxisPattern::JumpThree)
                    && !is_fake_three(board, mv.row as i32, mv.col as i32, a.axis.0, a.axis.1, color)
            });
        board.undo_in_place(mv, color);

        if is_threat {
            out.push(mv);
        }
    }

    // find_four_moves already applies the same forbidden-unless-five filter
    // and axis classification; folding its moves in avoids scanning twice
    // for positions that only have four-threats.
    for mv in find_four_moves(board, color) {
        if !out.contains(&mv) {
            out.push(mv);
        }
    }

    out
}

/// The defense squares that remove `mv`'s threat, for either a four (reuses
/// the VCF single-square logic) or an open/jump three (the two squares that
/// would complete it into an open four, minus any a fake three discards).
fn get_threat_defense_positions(board: &Board, mv: Move, color: Color) -> Vec<Move> {
    let axes = classify_all_axes(board, mv.row as i32, mv.col as i32, color);
    let has_four = axes.iter().any(|a| matches!(a.pattern, AxisPattern::OpenFour | AxisPattern::ClosedFour | AxisPattern::JumpFour));

    if has_four {
        return match find_defense_square(board, mv, color) {
            Some(defense) => vec![defense],
            None => Vec::new(),
        };
    }

    let mut defenses = Vec::new();
    for a in axes.iter().filter(|a: &&PatternBreakdown| matches!(a.pattern, AxisPattern::OpenThree | AxisPattern::JumpThree)) {
        if is_fake_three(board, mv.row as i32, mv.col as i32, a.axis.0, a.axis.1, color) {
            continue;
        }
        let (end1, end2) = run_end_cells(board, mv.row as i32, mv.col as i32, a.axis.0, a.axis.1, color);
        for (r, c) in [end1, end2] {
            if Board::is_valid_position(r, c) && board.get_rc(r, c).is_empty() {
                let defense = Move::new(r as u8, c as u8);
                if !defenses.contains(&defense) {
                    defenses.push(defense);
                }
            }
        }
    }
    defenses
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delegates_to_vcf_when_an_immediate_four_wins() {
        let mut board = Board::new();
        for col in 4..8u8 {
            board.place_in_place(Move::new(7, col), Color::White);
        }
        let result = find_vct_sequence(&mut board, Color::White, VCT_DEFAULT_MAX_DEPTH, 1000, false);
        assert!(result.is_some());
    }

    #[test]
    fn quiet_position_has_no_vct() {
        let mut board = Board::new();
        board.place_in_place(Move::center(), Color::White);
        assert!(find_vct_sequence(&mut board, Color::White, VCT_DEFAULT_MAX_DEPTH, 1000, false).is_none());
    }

    #[test]
    fn board_is_unchanged_after_a_search() {
        let mut board = Board::new();
        for col in 4..8u8 {
            board.place_in_place(Move::new(7, col), Color::White);
        }
        let before = board.clone();
        let _ = find_vct_sequence(&mut board, Color::White, VCT_DEFAULT_MAX_DEPTH, 1000, false);
        assert!(board.snapshot_eq(&before));
    }
}
