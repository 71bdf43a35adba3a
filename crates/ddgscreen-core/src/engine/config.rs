pub use crate::core::analysis::classify::EffectThresholds;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_RUN_PREFIX: &str = "run_";
pub const DEFAULT_RESULT_FILE_NAME: &str = "manual_mutation.ddg";
pub const DEFAULT_REPORT_FILE_NAME: &str = "all_ddg_results.csv";
pub const DEFAULT_HEATMAP_FILE_NAME: &str = "ddg_heatmap.svg";

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error(
        "Invalid effect thresholds: stabilizing ({stabilizing}) and destabilizing ({destabilizing}) must be finite with stabilizing <= destabilizing"
    )]
    InvalidThresholds { stabilizing: f64, destabilizing: f64 },

    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScreenConfig {
    pub root_dir: PathBuf,
    pub run_prefix: String,
    /// Location of the result file relative to each run directory.
    pub result_file_name: PathBuf,
    pub output_path: PathBuf,
    pub heatmap_path: Option<PathBuf>,
    pub thresholds: EffectThresholds,
}

pub struct ScreenConfigBuilder {
    root_dir: Option<PathBuf>,
    run_prefix: Option<String>,
    result_file_name: Option<PathBuf>,
    output_path: Option<PathBuf>,
    heatmap_path: Option<PathBuf>,
    render_heatmap: bool,
    stabilizing_threshold: Option<f64>,
    destabilizing_threshold: Option<f64>,
}

impl Default for ScreenConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ScreenConfigBuilder {
    pub fn new() -> Self {
        Self {
            root_dir: None,
            run_prefix: None,
            result_file_name: None,
            output_path: None,
            heatmap_path: None,
            render_heatmap: true,
            stabilizing_threshold: None,
            destabilizing_threshold: None,
        }
    }

    pub fn root_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.root_dir = Some(path.into());
        self
    }
    pub fn run_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.run_prefix = Some(prefix.into());
        self
    }
    pub fn result_file_name(mut self, name: impl Into<PathBuf>) -> Self {
        self.result_file_name = Some(name.into());
        self
    }
    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }
    pub fn heatmap_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.heatmap_path = Some(path.into());
        self
    }
    pub fn render_heatmap(mut self, enabled: bool) -> Self {
        self.render_heatmap = enabled;
        self
    }
    pub fn stabilizing_threshold(mut self, threshold: f64) -> Self {
        self.stabilizing_threshold = Some(threshold);
        self
    }
    pub fn destabilizing_threshold(mut self, threshold: f64) -> Self {
        self.destabilizing_threshold = Some(threshold);
        self
    }

    pub fn build(self) -> Result<ScreenConfig, ConfigError> {
        let root_dir = self
            .root_dir
            .ok_or(ConfigError::MissingParameter("root_dir"))?;

        let result_file_name = self
            .result_file_name
            .unwrap_or_else(|| PathBuf::from(DEFAULT_RESULT_FILE_NAME));
        validate_result_file_name(&result_file_name)?;

        let defaults = EffectThresholds::default();
        let thresholds = EffectThresholds {
            stabilizing: self.stabilizing_threshold.unwrap_or(defaults.stabilizing),
            destabilizing: self
                .destabilizing_threshold
                .unwrap_or(defaults.destabilizing),
        };
        if !thresholds.is_valid() {
            return Err(ConfigError::InvalidThresholds {
                stabilizing: thresholds.stabilizing,
                destabilizing: thresholds.destabilizing,
            });
        }

        let output_path = self
            .output_path
            .unwrap_or_else(|| root_dir.join(DEFAULT_REPORT_FILE_NAME));
        let heatmap_path = if self.render_heatmap {
            Some(
                self.heatmap_path
                    .unwrap_or_else(|| root_dir.join(DEFAULT_HEATMAP_FILE_NAME)),
            )
        } else {
            None
        };

        let run_prefix = self
            .run_prefix
            .unwrap_or_else(|| DEFAULT_RUN_PREFIX.to_string());
        validate_run_prefix(&run_prefix)?;

        Ok(ScreenConfig {
            run_prefix,
            result_file_name,
            output_path,
            heatmap_path,
            thresholds,
            root_dir,
        })
    }
}

// Matched against a single directory name, so it can never span a separator.
fn validate_run_prefix(prefix: &str) -> Result<(), ConfigError> {
    if prefix.contains(['/', '\\']) {
        return Err(ConfigError::InvalidParameter {
            name: "run_prefix",
            reason: format!("'{}' must not contain a path separator", prefix),
        });
    }
    Ok(())
}

fn validate_result_file_name(name: &Path) -> Result<(), ConfigError> {
    if name.as_os_str().is_empty() {
        return Err(ConfigError::InvalidParameter {
            name: "result_file_name",
            reason: "must not be empty".to_string(),
        });
    }
    if name.is_absolute() {
        return Err(ConfigError::InvalidParameter {
            name: "result_file_name",
            reason: format!(
                "'{}' must be relative to the run directory",
                name.display()
            ),
        });
    }
    Ok(())
}
