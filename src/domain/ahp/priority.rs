//! Priority Weight Engine - Geometric-mean priority vectors.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ComparisonMatrix;
use crate::domain::foundation::NumericError;

/// Normalized relative-importance weights, in the matrix's index order.
///
/// Vectors produced by this crate sum to 1. Vectors supplied by callers are
/// taken as-is and checked by the component that consumes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriorityVector(Vec<f64>);

impl PriorityVector {
    /// Wraps raw weights without checking them.
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    /// The uniform vector `1/n` repeated `n` times.
    pub fn uniform(n: usize) -> Self {
        Self(vec![1.0 / n as f64; n])
    }

    /// Weights as a slice.
    pub fn values(&self) -> &[f64] {
        &self.0
    }

    /// Weight at `index`, if present.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }

    /// Number of weights.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if there are no weights.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all weights.
    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }

    /// True if the weights sum to 1 within `tolerance`.
    pub fn is_normalized(&self, tolerance: f64) -> bool {
        (self.sum() - 1.0).abs() <= tolerance
    }

    /// Unwraps into the raw weights.
    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

impl From<Vec<f64>> for PriorityVector {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

/// Derives priority vectors from comparison matrices.
pub struct PriorityWeightEngine;

impl PriorityWeightEngine {
    /// Computes the priority vector by the geometric-mean (row-product) method.
    ///
    /// # Algorithm
    /// `g_i = (Π_j a[i][j])^(1/n)`, `w_i = g_i / Σ_k g_k`
    ///
    /// If any row product under- or overflows, every row is recomputed in log
    /// space as `exp(Σ_j ln a[i][j] / n)`, shifted by the largest row mean
    /// before exponentiating.
    ///
    /// The matrix is assumed to have passed [`super::MatrixValidator`];
    /// results on unvalidated input are meaningless.
    ///
    /// # Errors
    /// `NumericError::NonFinite` if the weights cannot be represented even in
    /// log space (e.g. negative or NaN entries).
    pub fn compute_weights(matrix: &ComparisonMatrix) -> Result<PriorityVector, NumericError> {
        let n = matrix.size() as f64;

        let direct: Vec<f64> = matrix
            .rows()
            .map(|row| row.iter().product::<f64>().powf(1.0 / n))
            .collect();

        let weights = if direct.iter().all(|g| g.is_finite() && *g > 0.0) {
            normalize(direct)
        } else {
            debug!(size = matrix.size(), "row product out of range, using log-space geometric mean");
            Self::log_space_weights(matrix)
        };

        if weights.iter().any(|w| !w.is_finite()) {
            return Err(NumericError::NonFinite {
                quantity: "priority weights",
            });
        }

        Ok(PriorityVector(weights))
    }

    fn log_space_weights(matrix: &ComparisonMatrix) -> Vec<f64> {
        let n = matrix.size() as f64;
        let log_means: Vec<f64> = matrix
            .rows()
            .map(|row| row.iter().map(|a| a.ln()).sum::<f64>() / n)
            .collect();

        let max = log_means.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        normalize(log_means.iter().map(|l| (l - max).exp()).collect())
    }
}

fn normalize(values: Vec<f64>) -> Vec<f64> {
    let total: f64 = values.iter().sum();
    values.into_iter().map(|v| v / total).collect()
}
