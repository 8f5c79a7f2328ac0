/// Independent on/off switches for the pattern scorer and search, threaded
/// through every call that affects scoring instead of living behind global
/// mutable coefficients (generator, search, evaluator all take one of these).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaluationOptions {
    pub enable_fukumi: bool,
    pub enable_mise: bool,
    pub enable_forbidden_trap: bool,
    pub enable_multi_threat: bool,
    pub enable_counter_four: bool,
    pub enable_vct: bool,
    pub enable_mandatory_defense: bool,
    pub enable_single_four_penalty: bool,
    pub single_four_penalty_multiplier: f32,
    pub enable_mise_threat: bool,
    pub enable_null_move_pruning: bool,
    pub enable_futility_pruning: bool,
    pub enable_forbidden_vulnerability: bool,
}

impl Default for EvaluationOptions {
    fn default() -> Self {
        Self {
            enable_fukumi: true,
            enable_mise: true,
            enable_forbidden_trap: true,
            enable_multi_threat: true,
            enable_counter_four: true,
            enable_vct: true,
            enable_mandatory_defense: true,
            enable_single_four_penalty: true,
            single_four_penalty_multiplier: 0.6,
            enable_mise_threat: true,
            enable_null_move_pruning: true,
            enable_futility_pruning: true,
            enable_forbidden_vulnerability: true,
        }
    }
}

impl EvaluationOptions {
    /// Every option on. Used by the hard difficulty preset.
    pub fn all_enabled() -> Self {
        Self::default()
    }

    /// Every option off: raw pattern scores only, no aggregate terms, no
    /// search-side pruning. Used by the easy difficulty preset.
    pub fn minimal() -> Self {
        Self {
            enable_fukumi: false,
            enable_mise: false,
            enable_forbidden_trap: false,
            enable_multi_threat: false,
            enable_counter_four: false,
            enable_vct: false,
            enable_mandatory_defense: false,
            enable_single_four_penalty: false,
            single_four_penalty_multiplier: 1.0,
            enable_mise_threat: false,
            enable_null_move_pruning: false,
            enable_futility_pruning: false,
            enable_forbidden_vulnerability: false,
        }
    }
}
