//! Comparison Matrix - Strongly-typed pairwise comparison data.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::MatrixValidator;
use crate::domain::foundation::{MatrixIssue, ValidationError};

/// One pairwise judgment: element `row` is `value` times as important as `col`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PairwiseJudgment {
    pub row: usize,
    pub col: usize,
    pub value: f64,
}

impl PairwiseJudgment {
    /// Creates a new judgment.
    pub fn new(row: usize, col: usize, value: f64) -> Self {
        Self { row, col, value }
    }
}

/// An n x n matrix of positive reals, stored row-major with explicit dimension.
///
/// Construction only guarantees the shape (square, n >= 1). Entry-level
/// invariants (positivity, unit diagonal, reciprocity) are checked by
/// [`MatrixValidator`] so that every violation can be reported at once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct ComparisonMatrix {
    size: usize,
    entries: Vec<f64>,
}

impl ComparisonMatrix {
    /// Builds a matrix from nested rows, rejecting empty or non-square input.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, ValidationError> {
        let issues = MatrixValidator::shape_issues(&rows);
        if !issues.is_empty() {
            return Err(ValidationError::InvalidMatrix { issues });
        }

        let size = rows.len();
        let entries = rows.into_iter().flatten().collect();
        Ok(Self { size, entries })
    }

    /// The `size` x `size` matrix of all-equal judgments.
    pub fn identity(size: usize) -> Result<Self, ValidationError> {
        if size == 0 {
            return Err(ValidationError::InvalidMatrix {
                issues: vec![MatrixIssue::Empty],
            });
        }
        Ok(Self {
            size,
            entries: vec![1.0; size * size],
        })
    }

    /// The perfectly consistent matrix implied by a weight vector: `a[i][j] = w_i / w_j`.
    pub fn from_weights(weights: &[f64]) -> Result<Self, ValidationError> {
        if weights.is_empty() {
            return Err(ValidationError::empty_field("weights"));
        }
        if let Some((index, &value)) = weights
            .iter()
            .enumerate()
            .find(|(_, w)| !(w.is_finite() && **w > 0.0))
        {
            return Err(ValidationError::invalid_value(
                "weights",
                index,
                value,
                "a finite positive number",
            ));
        }

        let size = weights.len();
        let mut entries = Vec::with_capacity(size * size);
        for wi in weights {
            for wj in weights {
                entries.push(wi / wj);
            }
        }
        Ok(Self { size, entries })
    }

    /// Assembles a full reciprocal matrix from individual judgments.
    ///
    /// Judgments may be given for either orientation of a pair; the mirror
    /// cell receives the reciprocal. Pairs without a judgment default to 1.
    /// A pair judged twice must agree.
    pub fn from_judgments(
        size: usize,
        judgments: &[PairwiseJudgment],
    ) -> Result<Self, ValidationError> {
        let mut matrix = Self::identity(size)?;
        let mut seen: HashMap<(usize, usize), f64> = HashMap::new();

        for (index, judgment) in judgments.iter().enumerate() {
            let PairwiseJudgment { row, col, value } = *judgment;

            if row >= size || col >= size {
                return Err(ValidationError::JudgmentOutOfRange { row, col, size });
            }
            if row == col {
                return Err(ValidationError::SelfComparison { index: row });
            }
            if !(value.is_finite() && value > 0.0) {
                return Err(ValidationError::invalid_value(
                    "judgments",
                    index,
                    value,
                    "a finite positive number",
                ));
            }

            // Key on the upper-triangle orientation.
            let (key, upper_value) = if row < col {
                ((row, col), value)
            } else {
                ((col, row), 1.0 / value)
            };
            if let Some(previous) = seen.insert(key, upper_value) {
                if (previous - upper_value).abs() > 1e-9 * previous.max(upper_value) {
                    return Err(ValidationError::ConflictingJudgment { row, col });
                }
            }

            matrix.set(row, col, value);
            matrix.set(col, row, 1.0 / value);
        }

        Ok(matrix)
    }

    /// Number of compared elements.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Entry at (row, col). Panics if out of bounds.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.entries[row * self.size + col]
    }

    fn set(&mut self, row: usize, col: usize, value: f64) {
        self.entries[row * self.size + col] = value;
    }

    /// Row `row` as a slice.
    pub fn row(&self, row: usize) -> &[f64] {
        &self.entries[row * self.size..(row + 1) * self.size]
    }

    /// Iterates over rows in order.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.entries.chunks(self.size)
    }

    /// Copies the matrix out as nested rows.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.rows().map(|r| r.to_vec()).collect()
    }
}

impl TryFrom<Vec<Vec<f64>>> for ComparisonMatrix {
    type Error = ValidationError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<ComparisonMatrix> for Vec<Vec<f64>> {
    fn from(matrix: ComparisonMatrix) -> Self {
        matrix.to_rows()
    }
}
