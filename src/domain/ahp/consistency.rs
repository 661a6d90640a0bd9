//! Consistency Evaluator - Principal eigenvalue estimate, CI and CR.

use serde::{Deserialize, Serialize};

use super::scale::{random_index, CONSISTENCY_THRESHOLD};
use super::{ComparisonMatrix, PriorityVector};
use crate::domain::foundation::{AhpError, NumericError, ValidationError};

/// Consistency figures for one matrix and its priority vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyReport {
    pub lambda_max: f64,
    pub consistency_index: f64,
    pub random_index: f64,
    pub consistency_ratio: f64,
    pub is_consistent: bool,
}

/// Consistency scoring functions.
pub struct ConsistencyEvaluator;

impl ConsistencyEvaluator {
    /// Evaluates consistency against the standard CR threshold of 0.1.
    pub fn evaluate(
        matrix: &ComparisonMatrix,
        weights: &PriorityVector,
    ) -> Result<ConsistencyReport, AhpError> {
        Self::evaluate_with_threshold(matrix, weights, CONSISTENCY_THRESHOLD)
    }

    /// Evaluates consistency.
    ///
    /// # Algorithm
    /// - `λ_i = (Aw)_i / w_i`, `λmax = mean(λ_i)`
    /// - `CI = (λmax - n) / (n - 1)` for n > 1, else 0
    /// - `CR = CI / RI[n]`, defined as 0 when `RI[n] == 0` (n <= 2)
    /// - consistent iff `CR <= threshold`
    ///
    /// # Errors
    /// - `ValidationError::LengthMismatch` if the vector does not match the matrix
    /// - `NumericError::ZeroWeight` if any weight is zero
    /// - `NumericError::NonFinite` if λmax cannot be represented
    pub fn evaluate_with_threshold(
        matrix: &ComparisonMatrix,
        weights: &PriorityVector,
        threshold: f64,
    ) -> Result<ConsistencyReport, AhpError> {
        let n = matrix.size();
        if weights.len() != n {
            return Err(ValidationError::length_mismatch("weights", n, weights.len()).into());
        }
        let w = weights.values();
        if let Some(index) = w.iter().position(|&wi| wi == 0.0) {
            return Err(NumericError::ZeroWeight { index }.into());
        }

        let lambda_sum: f64 = matrix
            .rows()
            .zip(w)
            .map(|(row, wi)| {
                let aw_i: f64 = row.iter().zip(w).map(|(a, wj)| a * wj).sum();
                aw_i / wi
            })
            .sum();
        let lambda_max = lambda_sum / n as f64;
        if !lambda_max.is_finite() {
            return Err(NumericError::NonFinite {
                quantity: "lambda max",
            }
            .into());
        }

        let consistency_index = if n > 1 {
            (lambda_max - n as f64) / (n as f64 - 1.0)
        } else {
            0.0
        };
        let ri = random_index(n);
        let consistency_ratio = if ri > 0.0 { consistency_index / ri } else { 0.0 };

        Ok(ConsistencyReport {
            lambda_max,
            consistency_index,
            random_index: ri,
            consistency_ratio,
            is_consistent: consistency_ratio <= threshold,
        })
    }
}
