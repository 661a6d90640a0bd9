//! Matrix Validator - Structural and numeric sanity checks on comparison matrices.

use serde::{Deserialize, Serialize};

use super::ComparisonMatrix;
use crate::domain::foundation::{MatrixIssue, ValidationError};

/// Default ε for the unit-diagonal and reciprocal checks.
///
/// Loose enough for judgments typed as truncated decimals (`0.333`).
pub const DEFAULT_MATRIX_TOLERANCE: f64 = 1e-3;

/// Outcome of validating a matrix. Lists every violation found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixValidation {
    pub valid: bool,
    pub errors: Vec<MatrixIssue>,
}

impl MatrixValidation {
    fn from_issues(errors: Vec<MatrixIssue>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// Human-readable message per violation.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.to_string()).collect()
    }

    /// Converts the report into a `Result`, carrying all issues on failure.
    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.valid {
            Ok(())
        } else {
            Err(ValidationError::InvalidMatrix {
                issues: self.errors,
            })
        }
    }
}

/// Pairwise comparison matrix validation functions.
pub struct MatrixValidator;

impl MatrixValidator {
    /// Validates raw nested rows with the default tolerance.
    pub fn validate_rows(rows: &[Vec<f64>]) -> MatrixValidation {
        Self::validate_rows_with_tolerance(rows, DEFAULT_MATRIX_TOLERANCE)
    }

    /// Validates raw nested rows.
    ///
    /// # Checks (in order)
    /// 1. Square shape
    /// 2. At least one row
    /// 3. All entries finite and > 0
    /// 4. Diagonal entries within `tolerance` of 1
    /// 5. `|a[i][j] * a[j][i] - 1| <= tolerance`, reported once per pair (i < j)
    ///
    /// All violations are collected. Entry checks still run on ragged input
    /// where the cells exist; the reciprocal check needs a square shape.
    pub fn validate_rows_with_tolerance(rows: &[Vec<f64>], tolerance: f64) -> MatrixValidation {
        let mut issues = Self::shape_issues(rows);
        if rows.is_empty() {
            return MatrixValidation::from_issues(issues);
        }
        let square = issues.is_empty();
        let n = rows.len();

        for (i, row) in rows.iter().enumerate() {
            for (j, &value) in row.iter().enumerate() {
                if !is_positive(value) {
                    issues.push(MatrixIssue::NonPositive {
                        row: i,
                        col: j,
                        value,
                    });
                }
            }
        }

        for (i, row) in rows.iter().enumerate() {
            if let Some(&value) = row.get(i) {
                if (value - 1.0).abs() > tolerance {
                    issues.push(MatrixIssue::DiagonalNotUnity { index: i, value });
                }
            }
        }

        if square {
            for i in 0..n {
                for j in (i + 1)..n {
                    let (a, b) = (rows[i][j], rows[j][i]);
                    if !(is_positive(a) && is_positive(b)) {
                        continue;
                    }
                    let product = a * b;
                    if (product - 1.0).abs() > tolerance {
                        issues.push(MatrixIssue::NotReciprocal {
                            row: i,
                            col: j,
                            product,
                        });
                    }
                }
            }
        }

        MatrixValidation::from_issues(issues)
    }

    /// Validates an already shaped matrix with the default tolerance.
    pub fn validate(matrix: &ComparisonMatrix) -> MatrixValidation {
        Self::validate_with_tolerance(matrix, DEFAULT_MATRIX_TOLERANCE)
    }

    /// Validates an already shaped matrix.
    pub fn validate_with_tolerance(matrix: &ComparisonMatrix, tolerance: f64) -> MatrixValidation {
        Self::validate_rows_with_tolerance(&matrix.to_rows(), tolerance)
    }

    /// Shape-only checks: non-empty, and every row as long as the row count.
    pub(crate) fn shape_issues(rows: &[Vec<f64>]) -> Vec<MatrixIssue> {
        if rows.is_empty() {
            return vec![MatrixIssue::Empty];
        }
        let expected = rows.len();
        rows.iter()
            .enumerate()
            .filter(|(_, row)| row.len() != expected)
            .map(|(row, r)| MatrixIssue::NotSquare {
                row,
                expected,
                actual: r.len(),
            })
            .collect()
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
