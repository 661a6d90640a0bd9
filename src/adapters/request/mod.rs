//! Request Adapter
//!
//! Typed request/response envelope over the AHP operations, decoded from
//! JSON or YAML documents and executed against the pure calculators.
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::request::{execute, load_request};
//!
//! let request = load_request("judgments.yaml").await?;
//! let response = execute(request, &config.analysis)?;
//! ```

mod codec;
mod dto;
mod executor;

pub use codec::{decode_request, load_request, RequestError, RequestFormat};
pub use dto::{ComputationRequest, ComputationResponse};
pub use executor::execute;
