//! # Workflows Module
//!
//! Top-level entry points of the library.
//!
//! - **Screen Workflow** ([`screen`]) - Scans a screening tree, writes the consolidated ΔΔG
//!   report and renders the optional heatmap.

pub mod screen;
