//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod ahp;

pub use ahp::{
    ComputeMatrixCommand, ComputeMatrixError, ComputeMatrixHandler, ComputeMatrixResult,
    GroupDecisionHandler, GroupDecisionQuery,
};
