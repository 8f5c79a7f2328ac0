use serde::Serialize;

use renju_core::{check_ends, count_line, find_jump_gap, Board, Color, AXES};

use super::EvalScore;

/// The recognized per-axis shapes a stone can participate in, ordered
/// roughly by strength. Jump variants carry the same urgency as their
/// consecutive counterpart (filling the gap produces the same completion).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AxisPattern {
    Five,
    OpenFour,
    ClosedFour,
    JumpFour,
    OpenThree,
    JumpThree,
    ClosedThree,
    OpenTwo,
    ClosedTwo,
    None,
}

/// Per-axis score table (spec.md §4.3). Jump four/three share their
/// consecutive counterpart's score since they carry the same forcing power.
pub fn pattern_score(pattern: AxisPattern) -> EvalScore {
    match pattern {
        AxisPattern::Five => 100_000,
        AxisPattern::OpenFour => 10_000,
        AxisPattern::ClosedFour | AxisPattern::JumpFour => 1_000,
        AxisPattern::OpenThree | AxisPattern::JumpThree => 1_000,
        AxisPattern::ClosedThree => 30,
        AxisPattern::OpenTwo => 50,
        AxisPattern::ClosedTwo => 10,
        AxisPattern::None => 0,
    }
}

/// One axis' contribution to a stone's total score, kept for the
/// review/annotation breakdown.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternBreakdown {
    pub axis: (i32, i32),
    pub pattern: AxisPattern,
    pub score: EvalScore,
}

/// Classifies the pattern formed by `color` through `(row, col)` (assumed
/// already on the board) along axis `(dr, dc)`.
pub fn classify_axis(board: &Board, row: i32, col: i32, dr: i32, dc: i32, color: Color) -> AxisPattern {
    let run = count_line(board, row, col, dr, dc, color);

    match run {
        n if n >= 5 => AxisPattern::Five,
        4 => {
            let (e1, e2) = check_ends(board, row, col, dr, dc, color);
            if e1 && e2 {
                AxisPattern::OpenFour
            } else if e1 || e2 {
                AxisPattern::ClosedFour
            } else if find_jump_gap(board, row, col, dr, dc, color, 3).is_some() {
                AxisPattern::JumpThree
            } else {
                AxisPattern::None
            }
        }
        3 => {
            let (e1, e2) = check_ends(board, row, col, dr, dc, color);
            if e1 && e2 {
                AxisPattern::OpenThree
            } else if find_jump_gap(board, row, col, dr, dc, color, 4).is_some() {
                AxisPattern::JumpFour
            } else if e1 || e2 {
                AxisPattern::ClosedThree
            } else {
                AxisPattern::None
            }
        }
        2 => {
            if find_jump_gap(board, row, col, dr, dc, color, 4).is_some() {
                AxisPattern::JumpFour
            } else if find_jump_gap(board, row, col, dr, dc, color, 3).is_some() {
                AxisPattern::JumpThree
            } else {
                let (e1, e2) = check_ends(board, row, col, dr, dc, color);
                if e1 && e2 {
                    AxisPattern::OpenTwo
                } else if e1 || e2 {
                    AxisPattern::ClosedTwo
                } else {
                    AxisPattern::None
                }
            }
        }
        _ => {
            if find_jump_gap(board, row, col, dr, dc, color, 4).is_some() {
                AxisPattern::JumpFour
            } else if find_jump_gap(board, row, col, dr, dc, color, 3).is_some() {
                AxisPattern::JumpThree
            } else {
                AxisPattern::None
            }
        }
    }
}

/// Classifies and scores all 4 axes through `(row, col)`, returning the
/// full per-axis breakdown used by `evaluate_position_breakdown`.
pub fn classify_all_axes(board: &Board, row: i32, col: i32, color: Color) -> Vec<PatternBreakdown> {
    AXES.iter()
        .map(|&(dr, dc)| {
            let pattern = classify_axis(board, row, col, dr, dc, color);
            PatternBreakdown { axis: (dr, dc), pattern, score: pattern_score(pattern) }
        })
        .collect()
}
