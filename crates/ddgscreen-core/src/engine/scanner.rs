use super::config::{EffectThresholds, ScreenConfig};
use super::progress::{Progress, ProgressReporter};
use crate::core::analysis::statistics::{MEAN_DECIMALS, compute_ddg, mean, round_to};
use crate::core::io::ddg::DdgFile;
use crate::core::models::record::DdgRecord;
use crate::core::models::run::RunResult;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScanError {
    #[error("Root directory '{path}' does not exist", path = path.display())]
    RootNotFound { path: PathBuf },
    #[error("Root path '{path}' is not a directory", path = path.display())]
    NotADirectory { path: PathBuf },
}

/// An eligible run directory: its name carries the run prefix and it holds a result file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunDirectory {
    pub run_name: String,
    pub path: PathBuf,
    pub result_file: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnomalyKind {
    MissingBaseline,
    Unreadable { reason: String },
}

/// A run that was skipped without aborting the scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunAnomaly {
    pub run_name: String,
    pub path: PathBuf,
    pub kind: AnomalyKind,
}

impl fmt::Display for RunAnomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            AnomalyKind::MissingBaseline => write!(
                f,
                "Run '{}' ({}): no WT energies found, run skipped",
                self.run_name,
                self.path.display()
            ),
            AnomalyKind::Unreadable { reason } => write!(
                f,
                "Run '{}' ({}): result file unreadable, run skipped: {}",
                self.run_name,
                self.path.display(),
                reason
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScanReport {
    pub records: Vec<DdgRecord>,
    pub anomalies: Vec<RunAnomaly>,
    pub runs_scanned: usize,
}

/// Walks `root` depth-first in lexical order and collects every eligible run directory.
///
/// The root itself is never a candidate. Entries that cannot be read are logged and skipped.
pub fn discover_runs(
    root: &Path,
    run_prefix: &str,
    result_file_name: &Path,
) -> Result<Vec<RunDirectory>, ScanError> {
    if !root.exists() {
        return Err(ScanError::RootNotFound {
            path: root.to_path_buf(),
        });
    }
    if !root.is_dir() {
        return Err(ScanError::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    let mut runs = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry under '{}': {}", root.display(), e);
                continue;
            }
        };
        // Follows a symlinked run directory without descending into it.
        if !entry.path().is_dir() {
            continue;
        }
        let run_name = entry.file_name().to_string_lossy();
        if !run_name.starts_with(run_prefix) {
            continue;
        }
        let result_file = entry.path().join(result_file_name);
        if !result_file.is_file() {
            debug!(
                "Directory '{}' has no '{}', not a run.",
                entry.path().display(),
                result_file_name.display()
            );
            continue;
        }
        runs.push(RunDirectory {
            run_name: run_name.into_owned(),
            path: entry.path().to_path_buf(),
            result_file,
        });
    }
    Ok(runs)
}

/// Derives one record per mutation tag of a run, in first-seen tag order.
///
/// A run without baseline samples yields nothing.
pub fn derive_records(run: &RunResult, thresholds: &EffectThresholds) -> Vec<DdgRecord> {
    let Some(baseline_mean) = mean(run.baseline()) else {
        return Vec::new();
    };

    run.mutants()
        .filter_map(|(tag, samples)| {
            let ddg = compute_ddg(run.baseline(), samples)?;
            let mutant_mean = mean(samples)?;
            Some(DdgRecord {
                run_name: run.run_name().to_string(),
                mutation: tag.to_string(),
                baseline_mean: round_to(baseline_mean, MEAN_DECIMALS),
                mutant_mean: round_to(mutant_mean, MEAN_DECIMALS),
                ddg,
                effect: thresholds.classify(ddg),
            })
        })
        .collect()
}

/// Scans the configured tree, parsing each run and deriving its ΔΔG records.
///
/// Runs without baseline data and runs whose result file cannot be read become anomalies;
/// only a missing or invalid root directory is an error.
pub fn scan(config: &ScreenConfig, reporter: &ProgressReporter) -> Result<ScanReport, ScanError> {
    let runs = discover_runs(
        &config.root_dir,
        &config.run_prefix,
        &config.result_file_name,
    )?;
    info!(
        "Found {} run director{} under '{}'.",
        runs.len(),
        if runs.len() == 1 { "y" } else { "ies" },
        config.root_dir.display()
    );
    reporter.report(Progress::RunsDiscovered {
        total: runs.len() as u64,
    });

    let mut report = ScanReport {
        runs_scanned: runs.len(),
        ..ScanReport::default()
    };

    for run_dir in &runs {
        match DdgFile::read_from_path(&run_dir.result_file, &run_dir.run_name) {
            Ok(run) if !run.has_baseline() => {
                push_anomaly(&mut report, run_dir, AnomalyKind::MissingBaseline, reporter);
            }
            Ok(run) => {
                let records = derive_records(&run, &config.thresholds);
                debug!(
                    "Run '{}': {} WT sample(s), {} mutation(s), {} record(s).",
                    run.run_name(),
                    run.baseline().len(),
                    run.mutation_count(),
                    records.len()
                );
                report.records.extend(records);
            }
            Err(e) => {
                let kind = AnomalyKind::Unreadable {
                    reason: e.to_string(),
                };
                push_anomaly(&mut report, run_dir, kind, reporter);
            }
        }
        reporter.report(Progress::RunProcessed {
            run_name: run_dir.run_name.clone(),
        });
    }

    Ok(report)
}

fn push_anomaly(
    report: &mut ScanReport,
    run_dir: &RunDirectory,
    kind: AnomalyKind,
    reporter: &ProgressReporter,
) {
    let anomaly = RunAnomaly {
        run_name: run_dir.run_name.clone(),
        path: run_dir.path.clone(),
        kind,
    };
    warn!("{}", anomaly);
    reporter.report(Progress::Anomaly(anomaly.to_string()));
    report.anomalies.push(anomaly);
}
