//! AHP command and query handlers.

// Command handlers
mod compute_matrix;

// Query handlers
mod group_decision;

pub use compute_matrix::{
    ComputeMatrixCommand, ComputeMatrixError, ComputeMatrixHandler, ComputeMatrixResult,
};
pub use group_decision::{GroupDecisionHandler, GroupDecisionQuery};
