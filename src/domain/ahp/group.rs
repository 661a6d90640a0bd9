//! Group Decision Aggregator - Combines evaluators into one group decision.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::debug;

use super::{
    ComparisonMatrix, CriteriaTree, GlobalWeights, HierarchicalSynthesizer, MatrixValidator,
    PriorityVector, DEFAULT_HIERARCHY_TOLERANCE, DEFAULT_MATRIX_TOLERANCE,
};
use crate::domain::foundation::{EvaluatorId, ValidationError};

/// What to do when every evaluator weight is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightingPolicy {
    /// Weighted aggregation was intended; all-zero weights are an error.
    #[default]
    RequireEvaluatorWeights,
    /// All-zero weights fall back to an unweighted mean.
    FallbackToEqual,
}

/// One evaluator's local vectors per hierarchy node, plus their importance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluatorResult {
    pub evaluator_id: EvaluatorId,
    pub per_node_vectors: HashMap<String, PriorityVector>,
    pub evaluator_weight: f64,
}

/// One evaluator's synthesized global weights, plus their importance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluatorWeights {
    pub evaluator_id: EvaluatorId,
    pub global_weights: GlobalWeights,
    pub evaluator_weight: f64,
}

/// One evaluator's comparison matrix, plus their importance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluatorMatrix {
    pub evaluator_id: EvaluatorId,
    pub matrix: ComparisonMatrix,
    pub evaluator_weight: f64,
}

/// Position of one alternative in the group ranking. Ranks start at 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedAlternative {
    pub alternative_id: String,
    pub score: f64,
    pub rank: usize,
}

/// The combined group decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupResult {
    pub aggregated_weights: BTreeMap<String, f64>,
    pub ranking: Vec<RankedAlternative>,
}

impl GroupResult {
    /// The top-ranked alternative, if any.
    pub fn winner(&self) -> Option<&RankedAlternative> {
        self.ranking.first()
    }
}

/// Group aggregation functions.
pub struct GroupDecisionAggregator;

impl GroupDecisionAggregator {
    /// Synthesizes each evaluator's hierarchy, then aggregates the results.
    pub fn aggregate_group(
        results: &[EvaluatorResult],
        tree: &CriteriaTree,
        policy: WeightingPolicy,
    ) -> Result<GroupResult, ValidationError> {
        Self::aggregate_group_with_tolerance(results, tree, policy, DEFAULT_HIERARCHY_TOLERANCE)
    }

    pub fn aggregate_group_with_tolerance(
        results: &[EvaluatorResult],
        tree: &CriteriaTree,
        policy: WeightingPolicy,
        tolerance: f64,
    ) -> Result<GroupResult, ValidationError> {
        let evaluators = results
            .iter()
            .map(|r| {
                Ok(EvaluatorWeights {
                    evaluator_id: r.evaluator_id.clone(),
                    global_weights: HierarchicalSynthesizer::synthesize_with_tolerance(
                        tree,
                        &r.per_node_vectors,
                        tolerance,
                    )?,
                    evaluator_weight: r.evaluator_weight,
                })
            })
            .collect::<Result<Vec<_>, ValidationError>>()?;

        Self::aggregate_weights(&evaluators, policy)
    }

    /// Evaluator-weighted arithmetic mean of global weights, renormalized and ranked.
    ///
    /// # Algorithm
    /// `aggregated_i = Σ_e (f_e × g_e,i) / Σ_e f_e`, then divided by its sum.
    /// Alternatives are ordered as the first evaluator reports them; ranking
    /// sorts by score descending and keeps that order among ties.
    ///
    /// # Edge Cases
    /// - One evaluator: their weights are returned unchanged
    /// - All weights zero: error, or unweighted mean under `FallbackToEqual`
    ///
    /// # Errors
    /// - `NoEvaluators` for empty input
    /// - `InvalidValue` for a negative or non-finite evaluator weight
    /// - `AlternativeMismatch` when evaluators report different alternatives
    /// - `DuplicateAlternative` when an evaluator reports an alternative twice
    /// - `ZeroEvaluatorWeight` per the policy above
    pub fn aggregate_weights(
        evaluators: &[EvaluatorWeights],
        policy: WeightingPolicy,
    ) -> Result<GroupResult, ValidationError> {
        let first = evaluators.first().ok_or(ValidationError::NoEvaluators)?;
        let factors = resolve_factors(evaluators.iter().map(|e| e.evaluator_weight), policy)?;

        let order: Vec<&str> = first.global_weights.iter().map(|l| l.node_id.as_str()).collect();
        let mut table: Vec<Vec<f64>> = Vec::with_capacity(evaluators.len());
        for evaluator in evaluators {
            table.push(align_to(&order, evaluator)?);
        }

        let aggregated: Vec<f64> = if table.len() == 1 {
            table[0].clone()
        } else {
            let total: f64 = factors.iter().sum();
            (0..order.len())
                .map(|i| {
                    table
                        .iter()
                        .zip(&factors)
                        .map(|(row, f)| f * row[i])
                        .sum::<f64>()
                        / total
                })
                .collect()
        };
        let aggregated = renormalize(aggregated);

        let mut ranked: Vec<usize> = (0..order.len()).collect();
        // Stable: ties keep insertion order.
        ranked.sort_by(|&a, &b| aggregated[b].total_cmp(&aggregated[a]));

        Ok(GroupResult {
            aggregated_weights: order
                .iter()
                .zip(&aggregated)
                .map(|(id, w)| (id.to_string(), *w))
                .collect(),
            ranking: ranked
                .into_iter()
                .enumerate()
                .map(|(position, i)| RankedAlternative {
                    alternative_id: order[i].to_string(),
                    score: aggregated[i],
                    rank: position + 1,
                })
                .collect(),
        })
    }

    /// Aggregation of individual judgments: the evaluator-weighted geometric
    /// mean of every cell, which keeps the result reciprocal.
    ///
    /// # Errors
    /// - `NoEvaluators` for empty input
    /// - `DimensionMismatch` when matrix sizes differ
    /// - `InvalidMatrix` when an input matrix fails validation
    /// - weight errors as in [`Self::aggregate_weights`]
    pub fn aggregate_judgments(
        evaluators: &[EvaluatorMatrix],
        policy: WeightingPolicy,
    ) -> Result<ComparisonMatrix, ValidationError> {
        Self::aggregate_judgments_with_tolerance(evaluators, policy, DEFAULT_MATRIX_TOLERANCE)
    }

    /// As [`Self::aggregate_judgments`], validating inputs with `tolerance`.
    pub fn aggregate_judgments_with_tolerance(
        evaluators: &[EvaluatorMatrix],
        policy: WeightingPolicy,
        tolerance: f64,
    ) -> Result<ComparisonMatrix, ValidationError> {
        let first = evaluators.first().ok_or(ValidationError::NoEvaluators)?;
        let factors = resolve_factors(evaluators.iter().map(|e| e.evaluator_weight), policy)?;

        let size = first.matrix.size();
        for evaluator in evaluators {
            if evaluator.matrix.size() != size {
                return Err(ValidationError::DimensionMismatch {
                    evaluator_id: evaluator.evaluator_id.to_string(),
                    expected: size,
                    actual: evaluator.matrix.size(),
                });
            }
            MatrixValidator::validate_with_tolerance(&evaluator.matrix, tolerance).into_result()?;
        }

        let total: f64 = factors.iter().sum();
        let rows = (0..size)
            .map(|i| {
                (0..size)
                    .map(|j| {
                        let log_mean = evaluators
                            .iter()
                            .zip(&factors)
                            .map(|(e, f)| f * e.matrix.get(i, j).ln())
                            .sum::<f64>()
                            / total;
                        log_mean.exp()
                    })
                    .collect()
            })
            .collect();

        ComparisonMatrix::from_rows(rows)
    }
}

/// Validates evaluator weights and applies the all-zero policy.
fn resolve_factors(
    weights: impl Iterator<Item = f64>,
    policy: WeightingPolicy,
) -> Result<Vec<f64>, ValidationError> {
    let factors: Vec<f64> = weights.collect();
    if let Some((index, &value)) = factors
        .iter()
        .enumerate()
        .find(|(_, w)| !(w.is_finite() && **w >= 0.0))
    {
        return Err(ValidationError::invalid_value(
            "evaluator_weight",
            index,
            value,
            "a finite non-negative number",
        ));
    }

    if factors.iter().all(|&f| f == 0.0) {
        return match policy {
            WeightingPolicy::RequireEvaluatorWeights => Err(ValidationError::ZeroEvaluatorWeight),
            WeightingPolicy::FallbackToEqual => {
                debug!(evaluators = factors.len(), "all evaluator weights zero, using unweighted mean");
                Ok(vec![1.0; factors.len()])
            }
        };
    }

    Ok(factors)
}

/// The evaluator's weights in `order`, requiring the same alternative set.
fn align_to(order: &[&str], evaluator: &EvaluatorWeights) -> Result<Vec<f64>, ValidationError> {
    let mismatch = |alternative_id: &str| ValidationError::AlternativeMismatch {
        evaluator_id: evaluator.evaluator_id.to_string(),
        alternative_id: alternative_id.to_string(),
    };

    let mut seen = HashSet::new();
    if let Some(repeated) = evaluator
        .global_weights
        .iter()
        .find(|l| !seen.insert(l.node_id.as_str()))
    {
        return Err(ValidationError::DuplicateAlternative {
            evaluator_id: evaluator.evaluator_id.to_string(),
            alternative_id: repeated.node_id.clone(),
        });
    }

    if let Some(extra) = evaluator
        .global_weights
        .iter()
        .find(|l| !order.contains(&l.node_id.as_str()))
    {
        return Err(mismatch(&extra.node_id));
    }

    order
        .iter()
        .map(|id| evaluator.global_weights.get(id).ok_or_else(|| mismatch(id)))
        .collect()
}

/// Divides by the sum unless already normalized.
fn renormalize(values: Vec<f64>) -> Vec<f64> {
    let total: f64 = values.iter().sum();
    if total <= 0.0 || (total - 1.0).abs() <= 1e-12 {
        return values;
    }
    values.into_iter().map(|v| v / total).collect()
}
