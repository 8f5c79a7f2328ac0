mod evaluate;
mod options;
mod patterns;

pub use evaluate::{
    evaluate_move, evaluate_position, evaluate_position_breakdown, is_fake_three, Evaluation, EvalScore,
    PositionBreakdown, StoneBreakdown, MANDATORY_DEFENSE_PENALTY, FIVE,
};
pub use options::EvaluationOptions;
pub use patterns::{classify_all_axes, classify_axis, pattern_score, AxisPattern, PatternBreakdown};
