mod engine;
mod evaluation;
mod forbidden_cache;
mod iterative;
mod mise;
mod movegen;
mod search;
mod threat;
mod threat_types;
mod time;
mod trasposition;
mod vcf;
mod vct;

pub use engine::{Difficulty, DifficultyPreset, Engine};
pub use evaluation::{
    evaluate_move, evaluate_position, evaluate_position_breakdown, AxisPattern, EvalScore, Evaluation,
    EvaluationOptions, PatternBreakdown, PositionBreakdown, StoneBreakdown, FIVE,
};
pub use iterative::{DepthRecord, ForcedOutcome, IterativeOptions, IterativeResult};
pub use mise::{MiseResult, MISE_DEFAULT_TIME_MS};
pub use search::{PVLine, SearchStats};
pub use trasposition::{TTStats, DEFAULT_TT_CAPACITY};
pub use vcf::{find_vcf_sequence, VcfResult, VCF_DEFAULT_MAX_DEPTH, VCF_REVIEW_MAX_DEPTH};
pub use vct::{VctBranch, VctResult, VCT_DEFAULT_MAX_DEPTH, VCT_REVIEW_MAX_DEPTH, VCT_STONE_THRESHOLD};
