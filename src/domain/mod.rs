//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors)
//! - `ahp` - Pure calculators for priority weights, consistency and synthesis

pub mod ahp;
pub mod foundation;
