//! Request/response envelope for the computation operations.
//!
//! These types are the typed boundary between serialized input (JSON or YAML)
//! and the pure calculators. Matrices decode straight into
//! `ComparisonMatrix`, so shape errors surface while decoding.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::domain::ahp::{
    AhpResult, AlternativeScore, ComparisonMatrix, ConsistencyReport, CriteriaTree,
    EvaluatorMatrix, EvaluatorResult, GroupResult, InconsistencyAdvice, MatrixValidation,
    PairwiseJudgment, PriorityVector,
};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// One computation, selected by the `operation` field.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum ComputationRequest {
    /// Report every structural problem with raw rows.
    ValidateMatrix { matrix: Vec<Vec<f64>> },

    /// Build a full reciprocal matrix from individual judgments.
    AssembleMatrix {
        size: usize,
        judgments: Vec<PairwiseJudgment>,
    },

    ComputeWeights { matrix: ComparisonMatrix },

    ComputeConsistency {
        matrix: ComparisonMatrix,
        weights: PriorityVector,
    },

    ComputeAhp { matrix: ComparisonMatrix },

    /// Weights are derived from the matrix when omitted.
    AdviseInconsistency {
        matrix: ComparisonMatrix,
        #[serde(default)]
        weights: Option<PriorityVector>,
        #[serde(default)]
        top_k: Option<usize>,
    },

    NormalizeDirectInput { values: Vec<f64>, is_benefit: bool },

    SynthesizeHierarchy {
        tree: CriteriaTree,
        local_weights: HashMap<String, PriorityVector>,
    },

    /// Global leaf weights combined with per-leaf alternative priorities.
    ScoreAlternatives {
        tree: CriteriaTree,
        local_weights: HashMap<String, PriorityVector>,
        alternative_ids: Vec<String>,
        alternative_weights: HashMap<String, PriorityVector>,
    },

    AggregateGroup {
        tree: CriteriaTree,
        evaluators: Vec<EvaluatorResult>,
    },

    AggregateJudgments { evaluators: Vec<EvaluatorMatrix> },
}

impl ComputationRequest {
    /// The `operation` tag, for logging.
    pub fn operation(&self) -> &'static str {
        match self {
            ComputationRequest::ValidateMatrix { .. } => "validate_matrix",
            ComputationRequest::AssembleMatrix { .. } => "assemble_matrix",
            ComputationRequest::ComputeWeights { .. } => "compute_weights",
            ComputationRequest::ComputeConsistency { .. } => "compute_consistency",
            ComputationRequest::ComputeAhp { .. } => "compute_ahp",
            ComputationRequest::AdviseInconsistency { .. } => "advise_inconsistency",
            ComputationRequest::NormalizeDirectInput { .. } => "normalize_direct_input",
            ComputationRequest::SynthesizeHierarchy { .. } => "synthesize_hierarchy",
            ComputationRequest::ScoreAlternatives { .. } => "score_alternatives",
            ComputationRequest::AggregateGroup { .. } => "aggregate_group",
            ComputationRequest::AggregateJudgments { .. } => "aggregate_judgments",
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Result of one computation, tagged by `result`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum ComputationResponse {
    Validation(MatrixValidation),
    Matrix { matrix: ComparisonMatrix },
    Weights { weights: PriorityVector },
    Consistency(ConsistencyReport),
    Ahp(AhpResult),
    Advice { advice: Vec<InconsistencyAdvice> },
    GlobalWeights { global_weights: BTreeMap<String, f64> },
    Scores { scores: Vec<AlternativeScore> },
    Group(GroupResult),
}
