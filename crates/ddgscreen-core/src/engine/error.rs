use thiserror::Error;

use super::config::ConfigError;
use super::scanner::ScanError;
use crate::core::io::report::ReportError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Scan failed: {source}")]
    Scan {
        #[from]
        source: ScanError,
    },

    #[error("Report could not be written: {source}")]
    Report {
        #[from]
        source: ReportError,
    },
}
