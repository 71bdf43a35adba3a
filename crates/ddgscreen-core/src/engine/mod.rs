//! # Engine Module
//!
//! Drives the aggregation pipeline over a screening tree.
//!
//! - **Configuration** ([`config`]) - Root directory, naming convention, output paths and thresholds
//! - **Scanning** ([`scanner`]) - Run discovery, per-run parsing and record derivation
//! - **Progress Monitoring** ([`progress`]) - Optional callbacks for user feedback
//! - **Error Handling** ([`error`]) - The engine-level error taxonomy
//!
//! Processing is strictly sequential: one run directory, and one result file, at a time.

pub mod config;
pub mod error;
pub mod progress;
pub mod scanner;
