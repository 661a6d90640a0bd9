//! Weights Repository Port - Persistence for computed matrix results.
//!
//! Computed weights, consistency figures and advice are stored per project,
//! evaluator and matrix. The calculators never touch this port; the
//! application layer writes through it after a computation succeeds.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::ahp::{ComparisonMatrix, ConsistencyReport, InconsistencyAdvice, PriorityVector};
use crate::domain::foundation::{EvaluatorId, MatrixKey, ProjectId, Timestamp};

/// Errors that can occur during weights persistence
#[derive(Debug, thiserror::Error)]
pub enum WeightsRepositoryError {
    #[error("Invalid storage key segment: {0}")]
    InvalidKey(String),

    #[error("Failed to serialize record: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize record: {0}")]
    DeserializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Identity of one stored computation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ComputationKey {
    pub project_id: ProjectId,
    pub evaluator_id: EvaluatorId,
    pub matrix_key: MatrixKey,
}

impl ComputationKey {
    pub fn new(project_id: ProjectId, evaluator_id: EvaluatorId, matrix_key: MatrixKey) -> Self {
        Self {
            project_id,
            evaluator_id,
            matrix_key,
        }
    }
}

impl fmt::Display for ComputationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.project_id, self.evaluator_id, self.matrix_key)
    }
}

/// Everything computed for one matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixComputationRecord {
    pub key: ComputationKey,
    pub matrix: ComparisonMatrix,
    pub weights: PriorityVector,
    pub consistency: ConsistencyReport,
    /// Empty when the matrix was consistent.
    pub advice: Vec<InconsistencyAdvice>,
    pub computed_at: Timestamp,
}

/// Port for persisting computed weights
#[async_trait]
pub trait WeightsRepository: Send + Sync {
    /// Insert or replace the record under its key (last writer wins)
    ///
    /// # Errors
    /// Returns `WeightsRepositoryError` if the record cannot be stored
    async fn upsert(&self, record: &MatrixComputationRecord) -> Result<(), WeightsRepositoryError>;

    /// Load the record for a key, if any
    async fn get(
        &self,
        key: &ComputationKey,
    ) -> Result<Option<MatrixComputationRecord>, WeightsRepositoryError>;

    /// All records of a project, ordered by key
    async fn list_for_project(
        &self,
        project_id: ProjectId,
    ) -> Result<Vec<MatrixComputationRecord>, WeightsRepositoryError>;
}
