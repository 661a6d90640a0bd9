//! Free-function surface over the AHP components.
//!
//! These are the entry points the request adapter and handlers call. Each one
//! uses the standard defaults; the `_with_*` forms take the tunable explicitly.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::scale::CONSISTENCY_THRESHOLD;
use super::{
    ComparisonMatrix, ConsistencyEvaluator, ConsistencyReport, CriteriaTree, CriterionDirection,
    DirectInputNormalizer, EvaluatorResult, GroupDecisionAggregator, GroupResult,
    HierarchicalSynthesizer, InconsistencyAdvice, InconsistencyAdvisor, MatrixValidation,
    MatrixValidator, PriorityVector, PriorityWeightEngine, WeightingPolicy,
    DEFAULT_HIERARCHY_TOLERANCE,
};
use crate::domain::foundation::{AhpError, ValidationError};

/// Weights and consistency for one matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AhpResult {
    pub weights: PriorityVector,
    pub consistency: ConsistencyReport,
}

/// Validates raw rows, collecting every violation.
pub fn validate_matrix(rows: &[Vec<f64>]) -> MatrixValidation {
    MatrixValidator::validate_rows(rows)
}

/// Geometric-mean priority vector. Assumes the matrix was validated.
pub fn compute_weights(matrix: &ComparisonMatrix) -> Result<PriorityVector, AhpError> {
    Ok(PriorityWeightEngine::compute_weights(matrix)?)
}

pub fn compute_consistency(
    matrix: &ComparisonMatrix,
    weights: &PriorityVector,
) -> Result<ConsistencyReport, AhpError> {
    ConsistencyEvaluator::evaluate(matrix, weights)
}

/// Weights followed by consistency.
pub fn compute_ahp(matrix: &ComparisonMatrix) -> Result<AhpResult, AhpError> {
    compute_ahp_with_threshold(matrix, CONSISTENCY_THRESHOLD)
}

pub fn compute_ahp_with_threshold(
    matrix: &ComparisonMatrix,
    threshold: f64,
) -> Result<AhpResult, AhpError> {
    let weights = PriorityWeightEngine::compute_weights(matrix)?;
    let consistency = ConsistencyEvaluator::evaluate_with_threshold(matrix, &weights, threshold)?;
    Ok(AhpResult {
        weights,
        consistency,
    })
}

pub fn advise_inconsistency(
    matrix: &ComparisonMatrix,
    weights: &PriorityVector,
    top_k: usize,
) -> Result<Vec<InconsistencyAdvice>, AhpError> {
    InconsistencyAdvisor::advise(matrix, weights, top_k)
}

pub fn normalize_direct_input(
    values: &[f64],
    is_benefit: bool,
) -> Result<PriorityVector, ValidationError> {
    DirectInputNormalizer::normalize(values, CriterionDirection::from_is_benefit(is_benefit))
}

/// Global weight per leaf id.
pub fn synthesize_hierarchy(
    local_weights: &HashMap<String, PriorityVector>,
    tree: &CriteriaTree,
) -> Result<BTreeMap<String, f64>, ValidationError> {
    synthesize_hierarchy_with_tolerance(local_weights, tree, DEFAULT_HIERARCHY_TOLERANCE)
}

pub fn synthesize_hierarchy_with_tolerance(
    local_weights: &HashMap<String, PriorityVector>,
    tree: &CriteriaTree,
    tolerance: f64,
) -> Result<BTreeMap<String, f64>, ValidationError> {
    HierarchicalSynthesizer::synthesize_with_tolerance(tree, local_weights, tolerance)
        .map(|global| global.to_map())
}

/// Synthesizes every evaluator over `tree`, then aggregates and ranks.
pub fn aggregate_group(
    results: &[EvaluatorResult],
    tree: &CriteriaTree,
    policy: WeightingPolicy,
) -> Result<GroupResult, ValidationError> {
    GroupDecisionAggregator::aggregate_group(results, tree, policy)
}
