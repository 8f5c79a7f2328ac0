use renju_core::{Board, Color, Move, AXES};

use crate::evaluation::{classify_all_axes, classify_axis, AxisPattern};
use crate::movegen::candidate_cells;
use crate::threat_types::ThreatSet;

/// Enumerates `color`'s threats over the current board (spec.md §4.4).
/// Scans only empty cells adjacent to existing stones for the move-based
/// sets (`open_fours`, `fours`, `mises`); `open_three_defenses` instead
/// scans `color`'s existing stones for already-formed open threes.
pub fn detect_threats(board: &Board, color: Color) -> ThreatSet {
    let mut set = ThreatSet::default();

    let mut probe = board.clone();
    for mv in candidate_cells(board) {
        probe.place_in_place(mv, color);
        let axes = classify_all_axes(&probe, mv.row as i32, mv.col as i32, color);

        let has_open_four = axes.iter().any(|a| a.pattern == AxisPattern::OpenFour);
        let has_four = axes.iter().any(|a| matches!(a.pattern, AxisPattern::ClosedFour | AxisPattern::JumpFour));
        let has_open_three = axes.iter().any(|a| matches!(a.pattern, AxisPattern::OpenThree | AxisPattern::JumpThree));

        if has_open_four {
            set.open_fours.push(mv);
        } else if has_four {
            set.fours.push(mv);
        }

        if has_four && has_open_three {
            set.mises.push(mv);
        }

        probe.undo_in_place(mv, color);
    }

    for row in 0..renju_core::BOARD_SIZE as i32 {
        for col in 0..renju_core::BOARD_SIZE as i32 {
            if board.get_rc(row, col).color() != Some(color) {
                continue;
            }
            for &(dr, dc) in AXES.iter() {
                if classify_axis(board, row, col, dr, dc, color) == AxisPattern::OpenThree {
                    let (end1, end2) = renju_core::run_end_cells(board, row, col, dr, dc, color);
                    for (r, c) in [end1, end2] {
                        if Board::is_valid_position(r, c) {
                            let defense = Move::new(r as u8, c as u8);
                            if !set.open_three_defenses.contains(&defense) {
                                set.open_three_defenses.push(defense);
                            }
                        }
                    }
                }
            }
        }
    }

    set
}
