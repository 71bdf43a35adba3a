//! # DDG Screen Core Library
//!
//! Aggregation of computational mutagenesis screening runs: every run directory produced by a
//! cartesian ddG protocol holds a result file with wild-type and mutant energy samples, and this
//! library turns a whole tree of such runs into one consolidated ΔΔG report.
//!
//! ## Architectural Philosophy
//!
//! The library follows a strict three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`RunResult`, `DdgRecord`), pure
//!   statistics and effect classification, and file I/O (result-file reader, CSV report,
//!   SVG heatmap).
//!
//! - **[`engine`]: The Logic Core.** Configuration, the error taxonomy, progress reporting and
//!   the run scanner that walks a screening tree and derives records run by run.
//!
//! - **[`workflows`]: The Public API.** The `screen` workflow ties scanning, report writing and
//!   best-effort visualization into a single call.

pub mod core;
pub mod engine;
pub mod workflows;
