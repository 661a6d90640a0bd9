//! Inconsistency Advisor - Ranks the judgments that contribute most to inconsistency.

use serde::{Deserialize, Serialize};

use super::scale::nearest_saaty_value;
use super::{ComparisonMatrix, PriorityVector};
use crate::domain::foundation::{AhpError, NumericError, ValidationError};

/// Number of cells reported when the caller does not choose.
pub const DEFAULT_ADVICE_TOP_K: usize = 5;

/// A suggested correction for one judgment `(row, col)` with `row < col`.
///
/// The mirror cell `(col, row)` should receive the reciprocal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InconsistencyAdvice {
    pub row: usize,
    pub col: usize,
    pub current_value: f64,
    /// Ratio `w_row / w_col` implied by the derived weights.
    pub implied_value: f64,
    /// `implied_value` snapped to the Saaty scale.
    pub recommended_value: f64,
    /// `|ln(current) - ln(implied)|`
    pub error_magnitude: f64,
}

/// Advisory-only analysis; never mutates the matrix.
pub struct InconsistencyAdvisor;

impl InconsistencyAdvisor {
    /// Returns up to `top_k` upper-triangle cells ordered by descending log error.
    ///
    /// Cells with equal error keep row-major order.
    ///
    /// # Errors
    /// - `ValidationError::LengthMismatch` if the vector does not match the matrix
    /// - `NumericError::ZeroWeight` if an implied ratio would divide by zero
    pub fn advise(
        matrix: &ComparisonMatrix,
        weights: &PriorityVector,
        top_k: usize,
    ) -> Result<Vec<InconsistencyAdvice>, AhpError> {
        let n = matrix.size();
        if weights.len() != n {
            return Err(ValidationError::length_mismatch("weights", n, weights.len()).into());
        }
        let w = weights.values();
        if let Some(index) = w.iter().position(|&wi| wi == 0.0) {
            return Err(NumericError::ZeroWeight { index }.into());
        }

        let mut cells = Vec::with_capacity(n * n.saturating_sub(1) / 2);
        for i in 0..n {
            for j in (i + 1)..n {
                let current_value = matrix.get(i, j);
                let implied_value = w[i] / w[j];
                cells.push(InconsistencyAdvice {
                    row: i,
                    col: j,
                    current_value,
                    implied_value,
                    recommended_value: nearest_saaty_value(implied_value),
                    error_magnitude: (current_value.ln() - implied_value.ln()).abs(),
                });
            }
        }

        // Stable sort keeps row-major order among equal errors.
        cells.sort_by(|a, b| b.error_magnitude.total_cmp(&a.error_magnitude));
        cells.truncate(top_k);
        Ok(cells)
    }
}
