//! Storage Adapters
//!
//! Implementations of the WeightsRepository port.
//!
//! ## Available Adapters
//!
//! - **FileWeightsRepository** - Stores records as YAML files on disk
//! - **InMemoryWeightsRepository** - Stores records in memory (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileWeightsRepository, InMemoryWeightsRepository};
//!
//! // Production: file-based storage
//! let repo = FileWeightsRepository::new("./data/weights");
//!
//! // Testing: in-memory storage
//! let repo = InMemoryWeightsRepository::new();
//! ```

mod file_weights_repository;
mod in_memory_weights_repository;

pub use file_weights_repository::FileWeightsRepository;
pub use in_memory_weights_repository::InMemoryWeightsRepository;
