//! Pure numerical stages of the pipeline: the ΔΔG statistic and effect classification.

pub mod classify;
pub mod statistics;
