//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Commands compute and persist; queries read stored computations back.

pub mod handlers;

pub use handlers::{
    ComputeMatrixCommand, ComputeMatrixError, ComputeMatrixHandler, ComputeMatrixResult,
    GroupDecisionHandler, GroupDecisionQuery,
};
