//! Input/output for the screening pipeline.
//!
//! - [`ddg`] reads the line-oriented result files written by the cartesian ddG protocol.
//! - [`report`] serializes derived records to the consolidated CSV report and reads it back.
//! - [`heatmap`] renders the run × mutation ΔΔG matrix as an SVG image.

pub mod ddg;
pub mod heatmap;
pub mod report;
