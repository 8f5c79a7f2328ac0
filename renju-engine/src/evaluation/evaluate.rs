use std::fmt::{Display, Formatter};
use std::ops::{Add, Neg, Sub};

use serde::Serialize;

use renju_core::{check_forbidden_move, Board, Color, Move, AXES, BOARD_SIZE};

use crate::threat_types::ThreatSet;

use super::options::EvaluationOptions;
use super::patterns::{classify_all_axes, classify_axis, pattern_score, AxisPattern, PatternBreakdown};

pub type EvalScore = i32;

/// A completed five. Search code treats scores within a small band of
/// `FIVE` as forced wins, the way a chess engine treats mate scores.
pub const FIVE: EvalScore = 100_000;

const FORBIDDEN_TRAP: EvalScore = 100;
const FORBIDDEN_TRAP_THREE: EvalScore = 3_000;
const FORBIDDEN_TRAP_SETUP: EvalScore = 1_500;
const FORBIDDEN_TRAP_STRONG: EvalScore = 8_000;
const FUKUMI_BONUS: EvalScore = 1_500;
const MISE_BONUS: EvalScore = 1_000;
const VCT_BONUS: EvalScore = 8_000;
const FOUR_THREE_BONUS: EvalScore = 5_000;
const MULTI_THREAT_BONUS: EvalScore = 500;
const DIAGONAL_MULTIPLIER: f32 = 1.05;
/// Per-cell weight of the `enableForbiddenVulnerability` aggregate term
/// (spec.md §4.13): every empty cell near a stone that is forbidden for
/// black counts against black regardless of whose move produced it.
const FORBIDDEN_VULNERABILITY_WEIGHT: EvalScore = 20;

/// Sentinel for "this move violates mandatory defense". Kept well clear of
/// `EvalScore::MIN` so that negating it, or adding a bonus on top, never
/// overflows or wraps back into a plausible score.
pub const MANDATORY_DEFENSE_PENALTY: EvalScore = EvalScore::MIN / 4;

/// Wraps a raw [`EvalScore`] so win-distance scores print the way
/// plies-to-mate do in a chess engine, instead of as an opaque large number.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Evaluation {
    score: EvalScore,
}

impl Evaluation {
    pub const fn new(score: EvalScore) -> Self {
        Self { score }
    }

    // The min value is one above EvalScore::MIN so that -min_val() == max_val()
    // and vice versa; otherwise negating it overflows.
    pub fn min_val() -> Self {
        Self::new(EvalScore::MIN + 1)
    }

    pub fn max_val() -> Self {
        Self::new(EvalScore::MAX)
    }

    pub fn score(&self) -> EvalScore {
        self.score
    }

    pub fn is_positive_win(&self) -> bool {
        self.score >= FIVE
    }

    pub fn is_negative_win(&self) -> bool {
        self.score <= -FIVE
    }
}

impl Neg for Evaluation {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Self::new(-self.score)
    }
}

impl Add<EvalScore> for Evaluation {
    type Output = Self;
    fn add(self, rhs: EvalScore) -> Self::Output {
        Self::new(self.score + rhs)
    }
}

impl Sub<EvalScore> for Evaluation {
    type Output = Self;
    fn sub(self, rhs: EvalScore) -> Self::Output {
        Self::new(self.score - rhs)
    }
}

impl Add<Self> for Evaluation {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.score + rhs.score)
    }
}

impl Sub<Self> for Evaluation {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.score - rhs.score)
    }
}

impl Display for Evaluation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_positive_win() {
            write!(f, "+W{}", EvalScore::MAX - self.score)
        } else if self.is_negative_win() {
            write!(f, "-W{}", self.score - EvalScore::MIN)
        } else {
            write!(f, "{:+}", self.score)
        }
    }
}

/// One stone's contribution to a whole-board evaluation, kept for
/// `evaluate_position_breakdown`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoneBreakdown {
    pub position: Move,
    pub color: Color,
    pub axes: Vec<PatternBreakdown>,
    pub center_bonus: EvalScore,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionBreakdown {
    pub stones: Vec<StoneBreakdown>,
    /// The `enableForbiddenVulnerability` aggregate term (spec.md §4.13),
    /// already folded into `total`; broken out here for annotation.
    pub forbidden_vulnerability: EvalScore,
    pub total: Evaluation,
}

fn center_bonus(row: i32, col: i32) -> EvalScore {
    let dist = (row - 7).abs().max((col - 7).abs());
    (5 - dist).max(0)
}

fn axis_contribution(pattern: AxisPattern, dr: i32, dc: i32) -> EvalScore {
    let raw = pattern_score(pattern) as f32;
    let multiplier = if dr != 0 && dc != 0 { DIAGONAL_MULTIPLIER } else { 1.0 };
    (raw * multiplier).round() as EvalScore
}

/// Evaluates how favorable the whole board is for `perspective` (spec.md
/// §4.3): sums the per-stone, per-axis pattern scores for `perspective`,
/// subtracts the same for the opponent, adds the signed center bonus, and
/// (when enabled) the `enableForbiddenVulnerability` weakness term.
pub fn evaluate_position(board: &Board, perspective: Color, options: &EvaluationOptions) -> Evaluation {
    let mut score: EvalScore = 0;

    for row in 0..BOARD_SIZE as i32 {
        for col in 0..BOARD_SIZE as i32 {
            let color = match board.get_rc(row, col).color() {
                Some(c) => c,
                None => continue,
            };
            let sign: EvalScore = (color.sign() * perspective.sign()) as EvalScore;

            for &(dr, dc) in AXES.iter() {
                let pattern = classify_axis(board, row, col, dr, dc, color);
                score += sign * axis_contribution(pattern, dr, dc);
            }
            score += sign * center_bonus(row, col);
        }
    }

    if options.enable_forbidden_vulnerability {
        score += perspective.sign() as EvalScore * forbidden_vulnerability_term(board);
    }

    Evaluation::new(score)
}

/// Same as [`evaluate_position`] but keeps the per-stone breakdown, for the
/// review/annotation pipeline.
pub fn evaluate_position_breakdown(board: &Board, perspective: Color, options: &EvaluationOptions) -> PositionBreakdown {
    let mut stones = Vec::new();
    let mut total: EvalScore = 0;

    for row in 0..BOARD_SIZE as i32 {
        for col in 0..BOARD_SIZE as i32 {
            let color = match board.get_rc(row, col).color() {
                Some(c) => c,
                None => continue,
            };
            let sign: EvalScore = (color.sign() * perspective.sign()) as EvalScore;

            let axes = classify_all_axes(board, row, col, color);
            let bonus = center_bonus(row, col);
            let stone_total: EvalScore =
                axes.iter().map(|a| axis_contribution(a.pattern, a.axis.0, a.axis.1)).sum::<EvalScore>() + bonus;
            total += sign * stone_total;

            stones.push(StoneBreakdown {
                position: Move::new(row as u8, col as u8),
                color,
                axes,
                center_bonus: bonus,
            });
        }
    }

    let forbidden_vulnerability = if options.enable_forbidden_vulnerability {
        perspective.sign() as EvalScore * forbidden_vulnerability_term(board)
    } else {
        0
    };
    total += forbidden_vulnerability;

    PositionBreakdown { stones, forbidden_vulnerability, total: Evaluation::new(total) }
}

/// Counts empty cells near existing stones that are forbidden for black,
/// weighting each by [`FORBIDDEN_VULNERABILITY_WEIGHT`]: black's own
/// forbidden geometry restricts its candidate moves, so more of it is
/// consistently bad for black regardless of whose stones created it
/// (spec.md §4.13's `enableForbiddenVulnerability`).
fn forbidden_vulnerability_term(board: &Board) -> EvalScore {
    let mut count: EvalScore = 0;
    for row in 0..BOARD_SIZE as i32 {
        for col in 0..BOARD_SIZE as i32 {
            if board.get_rc(row, col).is_empty()
                && board.has_neighbor_within(row, col, 2)
                && check_forbidden_move(board, row as u8, col as u8).is_forbidden
            {
                count += 1;
            }
        }
    }
    count * FORBIDDEN_VULNERABILITY_WEIGHT
}

/// Whether the open three through `(row, col)` on axis `(dr, dc)` is "fake":
/// both squares that would turn it into an open four are forbidden for
/// black, so it carries none of a real open three's urgency (spec.md §4.3).
pub(crate) fn is_fake_three(board: &Board, row: i32, col: i32, dr: i32, dc: i32, color: Color) -> bool {
    if color != Color::Black {
        return false;
    }
    let (end1, end2) = renju_core::run_end_cells(board, row, col, dr, dc, color);
    let forbidden_at = |r: i32, c: i32| Board::is_valid_position(r, c) && check_forbidden_move(board, r as u8, c as u8).is_forbidden;
    forbidden_at(end1.0, end1.1) && forbidden_at(end2.0, end2.1)
}

/// Scores the single move that produced `board` (`board` already has
/// `color`'s stone placed at `mv`), applying the aggregate bonuses and the
/// mandatory-defense gate of spec.md §4.3. `opponent_threats`, when given,
/// is the threat set the opponent held *before* this move was played.
pub fn evaluate_move(
    board: &Board,
    mv: Move,
    color: Color,
    opponent_threats: Option<&ThreatSet>,
    options: &EvaluationOptions,
) -> EvalScore {
    let row = mv.row as i32;
    let col = mv.col as i32;
    let axes = classify_all_axes(board, row, col, color);

    let has_five = axes.iter().any(|a| a.pattern == AxisPattern::Five);
    let has_open_four = axes.iter().any(|a| a.pattern == AxisPattern::OpenFour);

    let four_axes: Vec<&PatternBreakdown> = axes
        .iter()
        .filter(|a| matches!(a.pattern, AxisPattern::OpenFour | AxisPattern::ClosedFour | AxisPattern::JumpFour))
        .collect();
    let real_three_axes: Vec<&PatternBreakdown> = axes
        .iter()
        .filter(|a| matches!(a.pattern, AxisPattern::OpenThree | AxisPattern::JumpThree))
        .filter(|a| !is_fake_three(board, row, col, a.axis.0, a.axis.1, color))
        .collect();

    let is_four_three = !four_axes.is_empty() && !real_three_axes.is_empty();

    if options.enable_mandatory_defense {
        if let Some(threats) = opponent_threats {
            if !satisfies_mandatory_defense(mv, has_five, has_open_four, is_four_three, threats, options.enable_mise_threat) {
                return MANDATORY_DEFENSE_PENALTY;
            }
        }
    }

    let mut score: EvalScore = axes.iter().map(|a| axis_contribution(a.pattern, a.axis.0, a.axis.1)).sum();

    if options.enable_single_four_penalty && four_axes.len() == 1 && real_three_axes.is_empty() {
        let full = axis_contribution(four_axes[0].pattern, four_axes[0].axis.0, four_axes[0].axis.1);
        let penalized = (full as f32 * options.single_four_penalty_multiplier) as EvalScore;
        score -= full - penalized;
    }

    if is_four_three {
        score += FOUR_THREE_BONUS;
    }

    if options.enable_multi_threat {
        let threatening_axes = axes
            .iter()
            .filter(|a| {
                matches!(
                    a.pattern,
                    AxisPattern::OpenFour | AxisPattern::ClosedFour | AxisPattern::JumpFour | AxisPattern::OpenThree | AxisPattern::JumpThree
                )
            })
            .count();
        if threatening_axes > 1 {
            score += MULTI_THREAT_BONUS * (threatening_axes as EvalScore - 1);
        }
    }

    if options.enable_counter_four {
        if let Some(threats) = opponent_threats {
            if !four_axes.is_empty() && threats.open_three_defenses.contains(&mv) {
                score = (score as f32 * 1.5) as EvalScore;
            }
        }
    }

    if options.enable_mise
        && !four_axes.is_empty()
        && axes.iter().any(|a| matches!(a.pattern, AxisPattern::JumpFour | AxisPattern::JumpThree))
    {
        score += MISE_BONUS;
    }

    if options.enable_fukumi && four_axes.len() == 1 && four_axes[0].pattern == AxisPattern::ClosedFour {
        score += FUKUMI_BONUS;
    }

    if options.enable_vct && real_three_axes.len() >= 2 {
        score += VCT_BONUS;
    }

    if options.enable_forbidden_trap && color == Color::White {
        score += forbidden_trap_bonus(board, &axes, row, col);
    }

    score
}

/// Self-exceptions are limited to a move that creates a five, an open four,
/// or a four-three (testable property 10, spec.md §8) — a plain counter-four
/// does not on its own excuse ignoring the opponent's threat. Whichever tier
/// the opponent's strongest existing threat sits at otherwise decides what
/// answering it requires; when `consider_mises` is set and no such threat
/// exists, an opponent mise square (spec.md §4.13's `enableMiseThreat`) is
/// also accepted as a mandatory-defense candidate.
fn satisfies_mandatory_defense(
    mv: Move,
    has_five: bool,
    has_open_four: bool,
    is_four_three: bool,
    threats: &ThreatSet,
    consider_mises: bool,
) -> bool {
    if has_five || has_open_four || is_four_three {
        return true;
    }

    if !threats.open_fours.is_empty() {
        return threats.open_fours.contains(&mv);
    }
    if !threats.fours.is_empty() {
        return threats.fours.contains(&mv);
    }
    if !threats.open_three_defenses.is_empty() {
        return threats.open_three_defenses.contains(&mv);
    }
    if consider_mises && !threats.mises.is_empty() {
        return threats.mises.contains(&mv);
    }
    true
}

/// Heuristic proxy for "this move pushes black toward a forbidden square"
/// (spec.md §4.3): checks whether the squares that would extend this axis's
/// run further are forbidden for black, scaling the bonus with how strong
/// the resulting trap is.
fn forbidden_trap_bonus(board: &Board, axes: &[PatternBreakdown], row: i32, col: i32) -> EvalScore {
    let mut bonus = 0;
    for a in axes {
        if a.pattern == AxisPattern::None {
            continue;
        }
        let (end1, end2) = renju_core::run_end_cells(board, row, col, a.axis.0, a.axis.1, Color::Black);
        let forbidden_at = |r: i32, c: i32| Board::is_valid_position(r, c) && check_forbidden_move(board, r as u8, c as u8).is_forbidden;
        let trap_ends = forbidden_at(end1.0, end1.1) || forbidden_at(end2.0, end2.1);

        bonus += match a.pattern {
            AxisPattern::OpenFour if trap_ends => FORBIDDEN_TRAP_STRONG,
            AxisPattern::ClosedFour | AxisPattern::JumpFour if trap_ends => FORBIDDEN_TRAP_THREE,
            AxisPattern::OpenThree | AxisPattern::JumpThree if trap_ends => FORBIDDEN_TRAP_SETUP,
            _ if trap_ends => FORBIDDEN_TRAP,
            _ => 0,
        };
    }
    bonus
}
