//! AHP Core - Analytic Hierarchy Process computation
//!
//! This crate turns pairwise-comparison judgments into priority weights,
//! scores their consistency, advises on inconsistent judgments, and
//! synthesizes weights across criteria hierarchies and evaluator groups.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
