//! Dispatches decoded requests to the calculators.

use tracing::debug;

use super::dto::{ComputationRequest, ComputationResponse};
use crate::config::AnalysisConfig;
use crate::domain::ahp::{
    advise_inconsistency, compute_ahp_with_threshold, compute_weights, normalize_direct_input,
    synthesize_hierarchy_with_tolerance, ComparisonMatrix, ConsistencyEvaluator,
    GroupDecisionAggregator, HierarchicalSynthesizer, MatrixValidator,
};
use crate::domain::foundation::DomainError;

/// Runs one request with the configured tunables.
///
/// Matrices are validated with `matrix_tolerance` before any computation,
/// so garbage input fails with every issue listed instead of yielding
/// meaningless weights.
pub fn execute(
    request: ComputationRequest,
    config: &AnalysisConfig,
) -> Result<ComputationResponse, DomainError> {
    debug!(operation = request.operation(), "Executing computation request");

    let response = match request {
        ComputationRequest::ValidateMatrix { matrix } => ComputationResponse::Validation(
            MatrixValidator::validate_rows_with_tolerance(&matrix, config.matrix_tolerance),
        ),
        ComputationRequest::AssembleMatrix { size, judgments } => ComputationResponse::Matrix {
            matrix: ComparisonMatrix::from_judgments(size, &judgments)?,
        },
        ComputationRequest::ComputeWeights { matrix } => {
            ensure_valid(&matrix, config)?;
            ComputationResponse::Weights {
                weights: compute_weights(&matrix)?,
            }
        }
        ComputationRequest::ComputeConsistency { matrix, weights } => {
            ensure_valid(&matrix, config)?;
            ComputationResponse::Consistency(ConsistencyEvaluator::evaluate_with_threshold(
                &matrix,
                &weights,
                config.consistency_threshold,
            )?)
        }
        ComputationRequest::ComputeAhp { matrix } => {
            ensure_valid(&matrix, config)?;
            ComputationResponse::Ahp(compute_ahp_with_threshold(
                &matrix,
                config.consistency_threshold,
            )?)
        }
        ComputationRequest::AdviseInconsistency {
            matrix,
            weights,
            top_k,
        } => {
            ensure_valid(&matrix, config)?;
            let weights = match weights {
                Some(weights) => weights,
                None => compute_weights(&matrix)?,
            };
            ComputationResponse::Advice {
                advice: advise_inconsistency(
                    &matrix,
                    &weights,
                    top_k.unwrap_or(config.advice_top_k),
                )?,
            }
        }
        ComputationRequest::NormalizeDirectInput { values, is_benefit } => {
            ComputationResponse::Weights {
                weights: normalize_direct_input(&values, is_benefit)?,
            }
        }
        ComputationRequest::SynthesizeHierarchy {
            tree,
            local_weights,
        } => ComputationResponse::GlobalWeights {
            global_weights: synthesize_hierarchy_with_tolerance(
                &local_weights,
                &tree,
                config.hierarchy_tolerance,
            )?,
        },
        ComputationRequest::ScoreAlternatives {
            tree,
            local_weights,
            alternative_ids,
            alternative_weights,
        } => {
            let global = HierarchicalSynthesizer::synthesize_with_tolerance(
                &tree,
                &local_weights,
                config.hierarchy_tolerance,
            )?;
            ComputationResponse::Scores {
                scores: HierarchicalSynthesizer::score_alternatives(
                    &global,
                    &alternative_ids,
                    &alternative_weights,
                    config.hierarchy_tolerance,
                )?,
            }
        }
        ComputationRequest::AggregateGroup { tree, evaluators } => {
            ComputationResponse::Group(GroupDecisionAggregator::aggregate_group_with_tolerance(
                &evaluators,
                &tree,
                config.weighting_policy(),
                config.hierarchy_tolerance,
            )?)
        }
        ComputationRequest::AggregateJudgments { evaluators } => ComputationResponse::Matrix {
            matrix: GroupDecisionAggregator::aggregate_judgments_with_tolerance(
                &evaluators,
                config.weighting_policy(),
                config.matrix_tolerance,
            )?,
        },
    };

    Ok(response)
}

fn ensure_valid(matrix: &ComparisonMatrix, config: &AnalysisConfig) -> Result<(), DomainError> {
    MatrixValidator::validate_with_tolerance(matrix, config.matrix_tolerance)
        .into_result()
        .map_err(DomainError::from)
}
