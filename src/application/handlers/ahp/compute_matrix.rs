//! ComputeMatrixHandler - Command handler for computing and storing one matrix.
//!
//! Runs the full single-matrix pipeline:
//! validate → priority weights → consistency → advice (when inconsistent) → persist.

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::AnalysisConfig;
use crate::domain::ahp::{
    advise_inconsistency, compute_ahp_with_threshold, ComparisonMatrix, MatrixValidator,
};
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};
use crate::ports::{ComputationKey, MatrixComputationRecord, WeightsRepository};

/// Command to compute weights for one evaluator's matrix.
#[derive(Debug, Clone)]
pub struct ComputeMatrixCommand {
    /// Where the result is stored.
    pub key: ComputationKey,
    /// Raw judgment rows, validated before use.
    pub rows: Vec<Vec<f64>>,
}

/// Result of a successful computation.
#[derive(Debug, Clone)]
pub struct ComputeMatrixResult {
    /// The record as persisted.
    pub record: MatrixComputationRecord,
}

/// Error type for matrix computation.
#[derive(Debug, Clone)]
pub enum ComputeMatrixError {
    /// Invalid input or degenerate numerics.
    Domain(DomainError),
    /// Repository failure after a successful computation.
    Storage(String),
}

impl std::fmt::Display for ComputeMatrixError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComputeMatrixError::Domain(err) => write!(f, "{}", err),
            ComputeMatrixError::Storage(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for ComputeMatrixError {}

impl From<DomainError> for ComputeMatrixError {
    fn from(err: DomainError) -> Self {
        ComputeMatrixError::Domain(err)
    }
}

impl From<ComputeMatrixError> for DomainError {
    fn from(err: ComputeMatrixError) -> Self {
        match err {
            ComputeMatrixError::Domain(err) => err,
            ComputeMatrixError::Storage(msg) => DomainError::new(ErrorCode::StorageError, msg),
        }
    }
}

/// Handler for computing a matrix and persisting the outcome.
pub struct ComputeMatrixHandler {
    repository: Arc<dyn WeightsRepository>,
    config: AnalysisConfig,
}

impl ComputeMatrixHandler {
    pub fn new(repository: Arc<dyn WeightsRepository>, config: AnalysisConfig) -> Self {
        Self { repository, config }
    }

    pub async fn handle(
        &self,
        cmd: ComputeMatrixCommand,
    ) -> Result<ComputeMatrixResult, ComputeMatrixError> {
        // 1. Validate, reporting every issue at once
        MatrixValidator::validate_rows_with_tolerance(&cmd.rows, self.config.matrix_tolerance)
            .into_result()
            .map_err(DomainError::from)?;
        let matrix = ComparisonMatrix::from_rows(cmd.rows).map_err(DomainError::from)?;

        // 2. Weights and consistency
        let result = compute_ahp_with_threshold(&matrix, self.config.consistency_threshold)
            .map_err(DomainError::from)?;

        // 3. Advice only when the judgments need revisiting
        let advice = if result.consistency.is_consistent {
            Vec::new()
        } else {
            warn!(
                key = %cmd.key,
                consistency_ratio = result.consistency.consistency_ratio,
                threshold = self.config.consistency_threshold,
                "Matrix is inconsistent"
            );
            advise_inconsistency(&matrix, &result.weights, self.config.advice_top_k)
                .map_err(DomainError::from)?
        };

        // 4. Persist (last writer wins)
        let record = MatrixComputationRecord {
            key: cmd.key,
            matrix,
            weights: result.weights,
            consistency: result.consistency,
            advice,
            computed_at: Timestamp::now(),
        };
        self.repository
            .upsert(&record)
            .await
            .map_err(|e| ComputeMatrixError::Storage(e.to_string()))?;

        info!(
            project_id = %record.key.project_id,
            evaluator_id = %record.key.evaluator_id,
            matrix_key = %record.key.matrix_key,
            consistency_ratio = record.consistency.consistency_ratio,
            is_consistent = record.consistency.is_consistent,
            "Stored matrix computation"
        );

        Ok(ComputeMatrixResult { record })
    }
}
