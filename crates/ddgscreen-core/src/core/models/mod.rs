//! Data models shared by every stage of the pipeline.

pub mod matrix;
pub mod record;
pub mod run;
