use crate::cli::Cli;
use crate::error::{CliError, Result};
use ddgscreen::engine::config::{ScreenConfig, ScreenConfigBuilder};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PartialScanConfig {
    pub run_prefix: Option<String>,
    pub result_file: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PartialReportConfig {
    pub output: Option<PathBuf>,
    pub heatmap: Option<PathBuf>,
    pub no_heatmap: Option<bool>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PartialThresholdsConfig {
    pub stabilizing: Option<f64>,
    pub destabilizing: Option<f64>,
}

/// Settings read from a TOML file, every field optional.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PartialScreenConfig {
    pub scan: Option<PartialScanConfig>,
    pub report: Option<PartialReportConfig>,
    pub thresholds: Option<PartialThresholdsConfig>,
}

impl PartialScreenConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Loads the file when one is given, otherwise starts from an empty configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                debug!("Loading configuration file {:?}", path);
                Self::from_file(path)
            }
            None => Ok(Self::default()),
        }
    }

    /// Resolves the final configuration. Precedence: CLI flags, then `--set` values, then the
    /// file, then built-in defaults.
    pub fn merge_with_cli(mut self, args: &Cli) -> Result<ScreenConfig> {
        self.apply_set_values(&args.set_values)?;

        let scan = self.scan.unwrap_or_default();
        let report = self.report.unwrap_or_default();
        let thresholds = self.thresholds.unwrap_or_default();

        let mut builder = ScreenConfigBuilder::new().root_dir(args.root_dir.clone());

        if let Some(prefix) = args.run_prefix.clone().or(scan.run_prefix) {
            builder = builder.run_prefix(prefix);
        }
        if let Some(result_file) = args.result_file.clone().or(scan.result_file) {
            builder = builder.result_file_name(result_file);
        }
        if let Some(output) = args.output.clone().or(report.output) {
            builder = builder.output_path(output);
        }

        builder = if args.no_heatmap {
            builder.render_heatmap(false)
        } else if let Some(path) = &args.heatmap {
            builder.heatmap_path(path.clone())
        } else if report.no_heatmap.unwrap_or(false) {
            builder.render_heatmap(false)
        } else if let Some(path) = report.heatmap {
            builder.heatmap_path(path)
        } else {
            builder
        };

        if let Some(value) = args.stabilizing_threshold.or(thresholds.stabilizing) {
            builder = builder.stabilizing_threshold(value);
        }
        if let Some(value) = args.destabilizing_threshold.or(thresholds.destabilizing) {
            builder = builder.destabilizing_threshold(value);
        }

        builder.build().map_err(|e| CliError::Config(e.to_string()))
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };

            match key {
                "scan.run-prefix" => {
                    self.scan.get_or_insert_with(Default::default).run_prefix =
                        Some(value_str.to_string());
                }
                "scan.result-file" => {
                    self.scan.get_or_insert_with(Default::default).result_file =
                        Some(PathBuf::from(value_str));
                }
                "report.output" => {
                    self.report.get_or_insert_with(Default::default).output =
                        Some(PathBuf::from(value_str));
                }
                "report.heatmap" => {
                    self.report.get_or_insert_with(Default::default).heatmap =
                        Some(PathBuf::from(value_str));
                }
                "report.no-heatmap" => {
                    self.report.get_or_insert_with(Default::default).no_heatmap =
                        Some(value_str.parse().map_err(|_| {
                            CliError::Config(format!(
                                "Invalid boolean value for {}: {}",
                                key, value_str
                            ))
                        })?);
                }
                "thresholds.stabilizing" => {
                    self.thresholds
                        .get_or_insert_with(Default::default)
                        .stabilizing = Some(parse_float(key, value_str)?);
                }
                "thresholds.destabilizing" => {
                    self.thresholds
                        .get_or_insert_with(Default::default)
                        .destabilizing = Some(parse_float(key, value_str)?);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}

fn parse_float(key: &str, value_str: &str) -> Result<f64> {
    value_str.parse().map_err(|_| {
        CliError::Config(format!("Invalid float value for {}: {}", key, value_str))
    })
}
