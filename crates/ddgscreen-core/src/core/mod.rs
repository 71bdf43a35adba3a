//! # Core Module
//!
//! Fundamental building blocks of the ΔΔG aggregation pipeline.
//!
//! - **Data Models** ([`models`]) - Per-run energy samples, derived records and the pivoted matrix
//! - **Statistics** ([`analysis`]) - Mean-difference statistic and effect classification
//! - **File I/O** ([`io`]) - Result-file parsing, tabular report serialization and heatmap rendering
//!
//! Nothing in this module touches global state; every function is deterministic for its inputs.

pub mod analysis;
pub mod io;
pub mod models;
