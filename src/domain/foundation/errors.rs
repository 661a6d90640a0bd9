//! Error types for the domain layer.
//!
//! Two families are surfaced by the AHP core: [`ValidationError`] for malformed
//! input and [`NumericError`] for degenerate arithmetic. Both are wrapped by
//! [`AhpError`], which maps onto the serializable [`DomainError`] handed to
//! callers at the adapter boundary.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// A single problem found while validating a comparison matrix.
///
/// Every variant carries the coordinates needed to highlight the offending
/// cell(s) in a judgment grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatrixIssue {
    #[error("Matrix has no rows")]
    Empty,

    #[error("Row {row} has {actual} entries, expected {expected}")]
    NotSquare {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Entry ({row}, {col}) must be a finite positive number, got {value}")]
    NonPositive { row: usize, col: usize, value: f64 },

    #[error("Diagonal entry ({index}, {index}) must be 1, got {value}")]
    DiagonalNotUnity { index: usize, value: f64 },

    #[error("Entries ({row}, {col}) and ({col}, {row}) are not reciprocal: product is {product}")]
    NotReciprocal {
        row: usize,
        col: usize,
        product: f64,
    },
}

impl MatrixIssue {
    /// Returns the (row, col) cells this issue points at.
    pub fn cells(&self) -> Vec<(usize, usize)> {
        match self {
            MatrixIssue::Empty | MatrixIssue::NotSquare { .. } => Vec::new(),
            MatrixIssue::NonPositive { row, col, .. } => vec![(*row, *col)],
            MatrixIssue::DiagonalNotUnity { index, .. } => vec![(*index, *index)],
            MatrixIssue::NotReciprocal { row, col, .. } => vec![(*row, *col), (*col, *row)],
        }
    }
}

/// Malformed input. Always reported, never silently corrected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Comparison matrix is invalid ({} issue(s)): {}", .issues.len(), join_issues(.issues))]
    InvalidMatrix { issues: Vec<MatrixIssue> },

    #[error("Judgment ({row}, {col}) is outside a {size}x{size} matrix")]
    JudgmentOutOfRange { row: usize, col: usize, size: usize },

    #[error("Judgment ({index}, {index}) compares an element with itself")]
    SelfComparison { index: usize },

    #[error("Judgment ({row}, {col}) conflicts with an earlier judgment for the same pair")]
    ConflictingJudgment { row: usize, col: usize },

    #[error("Field '{field}' must have {expected} entries, got {actual}")]
    LengthMismatch {
        field: String,
        expected: usize,
        actual: usize,
    },

    #[error("Entry {index} of '{field}' must be {requirement}, got {value}")]
    InvalidValue {
        field: String,
        index: usize,
        value: f64,
        requirement: &'static str,
    },

    #[error("Hierarchy has no root node")]
    MissingRoot,

    #[error("Hierarchy has more than one root: {}", .node_ids.join(", "))]
    MultipleRoots { node_ids: Vec<String> },

    #[error("Hierarchy node '{node_id}' appears more than once")]
    DuplicateNode { node_id: String },

    #[error("Hierarchy node '{node_id}' references unknown parent '{parent_id}'")]
    UnknownParent { node_id: String, parent_id: String },

    #[error("Hierarchy node '{node_id}' is not reachable from the root")]
    UnreachableNode { node_id: String },

    #[error("Unknown node '{node_id}'")]
    UnknownNode { node_id: String },

    #[error("Hierarchy node '{node_id}' has children but no local weight vector")]
    MissingLocalWeights { node_id: String },

    #[error("Hierarchy node '{node_id}' has {children} children but {weights} local weights")]
    LocalWeightCount {
        node_id: String,
        children: usize,
        weights: usize,
    },

    #[error("Local weights of node '{node_id}' sum to {sum}, expected 1")]
    LocalWeightSum { node_id: String, sum: f64 },

    #[error("At least one evaluator is required")]
    NoEvaluators,

    #[error("Evaluator weighting was required but every evaluator weight is zero")]
    ZeroEvaluatorWeight,

    #[error("Evaluator '{evaluator_id}' does not report alternative '{alternative_id}'")]
    AlternativeMismatch {
        evaluator_id: String,
        alternative_id: String,
    },

    #[error("Evaluator '{evaluator_id}' reports alternative '{alternative_id}' more than once")]
    DuplicateAlternative {
        evaluator_id: String,
        alternative_id: String,
    },

    #[error("Matrix of evaluator '{evaluator_id}' is {actual}x{actual}, expected {expected}x{expected}")]
    DimensionMismatch {
        evaluator_id: String,
        expected: usize,
        actual: usize,
    },
}

fn join_issues(issues: &[MatrixIssue]) -> String {
    issues
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates a length mismatch error for a named input.
    pub fn length_mismatch(field: impl Into<String>, expected: usize, actual: usize) -> Self {
        ValidationError::LengthMismatch {
            field: field.into(),
            expected,
            actual,
        }
    }

    /// Creates an invalid value error for entry `index` of a named input.
    pub fn invalid_value(
        field: impl Into<String>,
        index: usize,
        value: f64,
        requirement: &'static str,
    ) -> Self {
        ValidationError::InvalidValue {
            field: field.into(),
            index,
            value,
            requirement,
        }
    }

    /// Returns the machine-readable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ValidationError::EmptyField { .. } => ErrorCode::EmptyField,
            ValidationError::InvalidMatrix { .. } => ErrorCode::InvalidMatrix,
            ValidationError::JudgmentOutOfRange { .. }
            | ValidationError::SelfComparison { .. }
            | ValidationError::ConflictingJudgment { .. } => ErrorCode::InvalidJudgment,
            ValidationError::LengthMismatch { .. } => ErrorCode::LengthMismatch,
            ValidationError::InvalidValue { .. } => ErrorCode::InvalidValue,
            ValidationError::MissingRoot
            | ValidationError::MultipleRoots { .. }
            | ValidationError::DuplicateNode { .. }
            | ValidationError::UnknownParent { .. }
            | ValidationError::UnreachableNode { .. }
            | ValidationError::UnknownNode { .. }
            | ValidationError::MissingLocalWeights { .. }
            | ValidationError::LocalWeightCount { .. } => ErrorCode::MalformedHierarchy,
            ValidationError::LocalWeightSum { .. } => ErrorCode::HierarchyWeightSum,
            ValidationError::NoEvaluators => ErrorCode::NoEvaluators,
            ValidationError::ZeroEvaluatorWeight => ErrorCode::ZeroEvaluatorWeight,
            ValidationError::AlternativeMismatch { .. }
            | ValidationError::DuplicateAlternative { .. } => ErrorCode::AlternativeMismatch,
            ValidationError::DimensionMismatch { .. } => ErrorCode::DimensionMismatch,
        }
    }

    /// Key/value pairs locating the offending cell, node or evaluator.
    pub fn details(&self) -> HashMap<String, String> {
        let mut details = HashMap::new();
        match self {
            ValidationError::EmptyField { field } => {
                details.insert("field".to_string(), field.clone());
            }
            ValidationError::InvalidMatrix { issues } => {
                let cells: Vec<String> = issues
                    .iter()
                    .flat_map(|i| i.cells())
                    .map(|(r, c)| format!("{}:{}", r, c))
                    .collect();
                details.insert("issue_count".to_string(), issues.len().to_string());
                details.insert("cells".to_string(), cells.join(","));
            }
            ValidationError::JudgmentOutOfRange { row, col, .. }
            | ValidationError::ConflictingJudgment { row, col } => {
                details.insert("row".to_string(), row.to_string());
                details.insert("col".to_string(), col.to_string());
            }
            ValidationError::SelfComparison { index } => {
                details.insert("row".to_string(), index.to_string());
                details.insert("col".to_string(), index.to_string());
            }
            ValidationError::LengthMismatch { field, .. } => {
                details.insert("field".to_string(), field.clone());
            }
            ValidationError::InvalidValue { field, index, .. } => {
                details.insert("field".to_string(), field.clone());
                details.insert("index".to_string(), index.to_string());
            }
            ValidationError::MultipleRoots { node_ids } => {
                details.insert("node_id".to_string(), node_ids.join(","));
            }
            ValidationError::DuplicateNode { node_id }
            | ValidationError::UnknownParent { node_id, .. }
            | ValidationError::UnreachableNode { node_id }
            | ValidationError::UnknownNode { node_id }
            | ValidationError::MissingLocalWeights { node_id }
            | ValidationError::LocalWeightCount { node_id, .. }
            | ValidationError::LocalWeightSum { node_id, .. } => {
                details.insert("node_id".to_string(), node_id.clone());
            }
            ValidationError::AlternativeMismatch {
                evaluator_id,
                alternative_id,
            }
            | ValidationError::DuplicateAlternative {
                evaluator_id,
                alternative_id,
            } => {
                details.insert("evaluator_id".to_string(), evaluator_id.clone());
                details.insert("alternative_id".to_string(), alternative_id.clone());
            }
            ValidationError::DimensionMismatch { evaluator_id, .. } => {
                details.insert("evaluator_id".to_string(), evaluator_id.clone());
            }
            ValidationError::MissingRoot
            | ValidationError::NoEvaluators
            | ValidationError::ZeroEvaluatorWeight => {}
        }
        details
    }
}

/// Degenerate numeric condition. Fatal for the computation that raised it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NumericError {
    #[error("Priority weight at index {index} is zero; consistency is undefined")]
    ZeroWeight { index: usize },

    #[error("Computing {quantity} produced a non-finite value")]
    NonFinite { quantity: &'static str },
}

impl NumericError {
    /// Returns the machine-readable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            NumericError::ZeroWeight { .. } => ErrorCode::ZeroWeight,
            NumericError::NonFinite { .. } => ErrorCode::NonFiniteResult,
        }
    }
}

/// Coarse error family, as exposed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    ValidationError,
    NumericError,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::ValidationError => "VALIDATION_ERROR",
            ErrorKind::NumericError => "NUMERIC_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Any failure raised by the AHP computations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AhpError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Numeric(#[from] NumericError),
}

impl AhpError {
    /// Returns the error family.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AhpError::Validation(_) => ErrorKind::ValidationError,
            AhpError::Numeric(_) => ErrorKind::NumericError,
        }
    }

    /// Returns the specific machine-readable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            AhpError::Validation(e) => e.code(),
            AhpError::Numeric(e) => e.code(),
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    EmptyField,
    InvalidMatrix,
    InvalidJudgment,
    LengthMismatch,
    InvalidValue,
    MalformedHierarchy,
    HierarchyWeightSum,
    NoEvaluators,
    ZeroEvaluatorWeight,
    AlternativeMismatch,
    DimensionMismatch,

    // Numeric errors
    ZeroWeight,
    NonFiniteResult,

    // Lookup errors
    ComputationNotFound,

    // Infrastructure errors
    StorageError,
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::EmptyField => "EMPTY_FIELD",
            ErrorCode::InvalidMatrix => "INVALID_MATRIX",
            ErrorCode::InvalidJudgment => "INVALID_JUDGMENT",
            ErrorCode::LengthMismatch => "LENGTH_MISMATCH",
            ErrorCode::InvalidValue => "INVALID_VALUE",
            ErrorCode::MalformedHierarchy => "MALFORMED_HIERARCHY",
            ErrorCode::HierarchyWeightSum => "HIERARCHY_WEIGHT_SUM",
            ErrorCode::NoEvaluators => "NO_EVALUATORS",
            ErrorCode::ZeroEvaluatorWeight => "ZERO_EVALUATOR_WEIGHT",
            ErrorCode::AlternativeMismatch => "ALTERNATIVE_MISMATCH",
            ErrorCode::DimensionMismatch => "DIMENSION_MISMATCH",
            ErrorCode::ZeroWeight => "ZERO_WEIGHT",
            ErrorCode::NonFiniteResult => "NON_FINITE_RESULT",
            ErrorCode::ComputationNotFound => "COMPUTATION_NOT_FOUND",
            ErrorCode::StorageError => "STORAGE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone, Serialize)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a validation error for a specific field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::ValidationFailed,
            message: message.into(),
            details: HashMap::new(),
        }
        .with_detail("field", field.into())
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl From<AhpError> for DomainError {
    fn from(err: AhpError) -> Self {
        let details = match &err {
            AhpError::Validation(e) => e.details(),
            AhpError::Numeric(NumericError::ZeroWeight { index }) => {
                HashMap::from([("index".to_string(), index.to_string())])
            }
            AhpError::Numeric(NumericError::NonFinite { quantity }) => {
                HashMap::from([("quantity".to_string(), quantity.to_string())])
            }
        };
        Self {
            code: err.code(),
            message: err.to_string(),
            details,
        }
        .with_detail("kind", err.kind().to_string())
    }
}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        AhpError::from(err).into()
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("evaluator_id");
        assert_eq!(format!("{}", err), "Field 'evaluator_id' cannot be empty");
    }

    #[test]
    fn invalid_matrix_lists_every_issue() {
        let err = ValidationError::InvalidMatrix {
            issues: vec![
                MatrixIssue::DiagonalNotUnity { index: 1, value: 2.0 },
                MatrixIssue::NonPositive {
                    row: 0,
                    col: 2,
                    value: -1.0,
                },
            ],
        };
        let text = err.to_string();
        assert!(text.contains("2 issue(s)"));
        assert!(text.contains("Diagonal entry (1, 1) must be 1, got 2"));
        assert!(text.contains("Entry (0, 2) must be a finite positive number, got -1"));
    }

    #[test]
    fn invalid_matrix_details_name_offending_cells() {
        let err = ValidationError::InvalidMatrix {
            issues: vec![MatrixIssue::NotReciprocal {
                row: 0,
                col: 1,
                product: 1.5,
            }],
        };
        let details = err.details();
        assert_eq!(details.get("cells"), Some(&"0:1,1:0".to_string()));
        assert_eq!(details.get("issue_count"), Some(&"1".to_string()));
    }

    #[test]
    fn hierarchy_errors_share_malformed_code() {
        assert_eq!(ValidationError::MissingRoot.code(), ErrorCode::MalformedHierarchy);
        let err = ValidationError::LocalWeightSum {
            node_id: "cost".to_string(),
            sum: 0.9,
        };
        assert_eq!(err.code(), ErrorCode::HierarchyWeightSum);
        assert_eq!(err.details().get("node_id"), Some(&"cost".to_string()));
    }

    #[test]
    fn ahp_error_reports_kind_and_code() {
        let err: AhpError = NumericError::ZeroWeight { index: 2 }.into();
        assert_eq!(err.kind(), ErrorKind::NumericError);
        assert_eq!(err.code(), ErrorCode::ZeroWeight);

        let err: AhpError = ValidationError::NoEvaluators.into();
        assert_eq!(err.kind(), ErrorKind::ValidationError);
        assert_eq!(err.code(), ErrorCode::NoEvaluators);
    }

    #[test]
    fn domain_error_from_ahp_error_carries_details() {
        let err: DomainError = AhpError::from(NumericError::ZeroWeight { index: 3 }).into();
        assert_eq!(err.code, ErrorCode::ZeroWeight);
        assert_eq!(err.details.get("index"), Some(&"3".to_string()));
        assert_eq!(err.details.get("kind"), Some(&"NUMERIC_ERROR".to_string()));
    }

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::InvalidMatrix, "Matrix rejected");
        assert_eq!(format!("{}", err), "[INVALID_MATRIX] Matrix rejected");
    }

    #[test]
    fn domain_error_with_detail_adds_detail() {
        let err = DomainError::new(ErrorCode::ValidationFailed, "Validation failed")
            .with_detail("field", "matrix")
            .with_detail("reason", "not square");

        assert_eq!(err.details.get("field"), Some(&"matrix".to_string()));
        assert_eq!(err.details.get("reason"), Some(&"not square".to_string()));
    }

    #[test]
    fn error_code_display_formats_correctly() {
        assert_eq!(format!("{}", ErrorCode::ZeroEvaluatorWeight), "ZERO_EVALUATOR_WEIGHT");
        assert_eq!(format!("{}", ErrorCode::InternalError), "INTERNAL_ERROR");
    }

    #[test]
    fn error_code_serializes_like_display() {
        let json = serde_json::to_string(&ErrorCode::HierarchyWeightSum).unwrap();
        assert_eq!(json, "\"HIERARCHY_WEIGHT_SUM\"");
    }
}
