//! GroupDecisionHandler - Query handler combining stored evaluator results.
//!
//! Loads every evaluator's stored weights for each inner node of the criteria
//! tree, synthesizes them per evaluator and aggregates the group ranking.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use tracing::{debug, info};

use crate::config::AnalysisConfig;
use crate::domain::ahp::{CriteriaTree, EvaluatorResult, GroupDecisionAggregator, GroupResult};
use crate::domain::foundation::{DomainError, ErrorCode, EvaluatorId, MatrixKey, ProjectId};
use crate::ports::{ComputationKey, WeightsRepository};

/// Query for a project's group decision.
#[derive(Debug, Clone)]
pub struct GroupDecisionQuery {
    pub project_id: ProjectId,
    pub tree: CriteriaTree,
    /// Stored matrix holding each inner node's local weights, read in node id order.
    pub node_matrices: BTreeMap<String, MatrixKey>,
    /// Importance of each participating evaluator.
    pub evaluator_weights: BTreeMap<EvaluatorId, f64>,
}

/// Handler for group decisions over stored computations.
pub struct GroupDecisionHandler {
    repository: Arc<dyn WeightsRepository>,
    config: AnalysisConfig,
}

impl GroupDecisionHandler {
    pub fn new(repository: Arc<dyn WeightsRepository>, config: AnalysisConfig) -> Self {
        Self { repository, config }
    }

    pub async fn handle(&self, query: GroupDecisionQuery) -> Result<GroupResult, DomainError> {
        let mut results = Vec::with_capacity(query.evaluator_weights.len());

        for (evaluator_id, &evaluator_weight) in &query.evaluator_weights {
            let mut per_node_vectors = HashMap::with_capacity(query.node_matrices.len());
            for (node_id, matrix_key) in &query.node_matrices {
                let key = ComputationKey::new(
                    query.project_id,
                    evaluator_id.clone(),
                    matrix_key.clone(),
                );
                let record = self
                    .repository
                    .get(&key)
                    .await
                    .map_err(|e| DomainError::new(ErrorCode::StorageError, e.to_string()))?
                    .ok_or_else(|| {
                        DomainError::new(
                            ErrorCode::ComputationNotFound,
                            format!("No stored computation for {}", key),
                        )
                        .with_detail("node_id", node_id.clone())
                    })?;
                per_node_vectors.insert(node_id.clone(), record.weights);
            }

            debug!(
                evaluator_id = %evaluator_id,
                nodes = per_node_vectors.len(),
                "Loaded evaluator weights"
            );
            results.push(EvaluatorResult {
                evaluator_id: evaluator_id.clone(),
                per_node_vectors,
                evaluator_weight,
            });
        }

        let group = GroupDecisionAggregator::aggregate_group_with_tolerance(
            &results,
            &query.tree,
            self.config.weighting_policy(),
            self.config.hierarchy_tolerance,
        )?;

        info!(
            project_id = %query.project_id,
            evaluators = results.len(),
            winner = group.winner().map(|w| w.alternative_id.as_str()).unwrap_or(""),
            "Computed group decision"
        );

        Ok(group)
    }
}
