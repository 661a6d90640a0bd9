//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `WeightsRepository` - Stores computed weights, consistency and advice
//!   keyed by project, evaluator and matrix

mod weights_repository;

pub use weights_repository::{
    ComputationKey, MatrixComputationRecord, WeightsRepository, WeightsRepositoryError,
};
