//! Analysis configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::ahp::{
    WeightingPolicy, CONSISTENCY_THRESHOLD, DEFAULT_ADVICE_TOP_K, DEFAULT_HIERARCHY_TOLERANCE,
    DEFAULT_MATRIX_TOLERANCE,
};

/// Tunables for the AHP calculators
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// ε for the unit-diagonal and reciprocal checks
    #[serde(default = "default_matrix_tolerance")]
    pub matrix_tolerance: f64,

    /// ε for "local vector sums to 1"
    #[serde(default = "default_hierarchy_tolerance")]
    pub hierarchy_tolerance: f64,

    /// CR at or below which a matrix counts as consistent
    #[serde(default = "default_consistency_threshold")]
    pub consistency_threshold: f64,

    /// Number of judgments reported by the inconsistency advisor
    #[serde(default = "default_advice_top_k")]
    pub advice_top_k: usize,

    /// Reject all-zero evaluator weights instead of averaging evenly
    #[serde(default = "default_require_evaluator_weights")]
    pub require_evaluator_weights: bool,
}

impl AnalysisConfig {
    /// Aggregation policy selected by `require_evaluator_weights`
    pub fn weighting_policy(&self) -> WeightingPolicy {
        if self.require_evaluator_weights {
            WeightingPolicy::RequireEvaluatorWeights
        } else {
            WeightingPolicy::FallbackToEqual
        }
    }

    /// Validate analysis configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_tolerance("matrix_tolerance", self.matrix_tolerance)?;
        check_tolerance("hierarchy_tolerance", self.hierarchy_tolerance)?;
        if !(self.consistency_threshold > 0.0 && self.consistency_threshold <= 1.0) {
            return Err(ValidationError::InvalidThreshold(self.consistency_threshold));
        }
        if self.advice_top_k == 0 {
            return Err(ValidationError::InvalidTopK);
        }
        Ok(())
    }
}

fn check_tolerance(name: &'static str, value: f64) -> Result<(), ValidationError> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidTolerance { name, value })
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            matrix_tolerance: default_matrix_tolerance(),
            hierarchy_tolerance: default_hierarchy_tolerance(),
            consistency_threshold: default_consistency_threshold(),
            advice_top_k: default_advice_top_k(),
            require_evaluator_weights: default_require_evaluator_weights(),
        }
    }
}

fn default_matrix_tolerance() -> f64 {
    DEFAULT_MATRIX_TOLERANCE
}

fn default_hierarchy_tolerance() -> f64 {
    DEFAULT_HIERARCHY_TOLERANCE
}

fn default_consistency_threshold() -> f64 {
    CONSISTENCY_THRESHOLD
}

fn default_advice_top_k() -> usize {
    DEFAULT_ADVICE_TOP_K
}

fn default_require_evaluator_weights() -> bool {
    true
}
