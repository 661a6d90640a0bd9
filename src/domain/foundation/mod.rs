//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps and the error taxonomy that form the
//! vocabulary of the AHP core.

mod errors;
mod ids;
mod timestamp;

pub use errors::{
    AhpError, DomainError, ErrorCode, ErrorKind, MatrixIssue, NumericError, ValidationError,
};
pub use ids::{EvaluatorId, MatrixKey, ProjectId};
pub use timestamp::Timestamp;
