//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `storage` - Weights repository implementations (in-memory, YAML files)
//! - `request` - Serialized request/response boundary for the calculators

pub mod request;
pub mod storage;

pub use request::{execute, load_request, ComputationRequest, ComputationResponse};
pub use storage::{FileWeightsRepository, InMemoryWeightsRepository};
