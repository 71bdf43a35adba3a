use crate::core::io::{heatmap, report};
use crate::core::models::record::DdgRecord;
use crate::engine::config::ScreenConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::scanner::{self, RunAnomaly};
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeatmapStatus {
    Disabled,
    Written(PathBuf),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScreenOutcome {
    pub records: Vec<DdgRecord>,
    pub anomalies: Vec<RunAnomaly>,
    pub runs_scanned: usize,
    pub report_path: PathBuf,
    pub heatmap: HeatmapStatus,
}

/// Runs the whole pipeline: scan, write the report, then render the heatmap.
///
/// A report that cannot be written fails the workflow. Heatmap failures are logged and
/// recorded in the outcome but never affect the report.
#[instrument(skip_all, name = "screen_workflow", fields(root = %config.root_dir.display()))]
pub fn run(
    config: &ScreenConfig,
    reporter: &ProgressReporter,
) -> Result<ScreenOutcome, EngineError> {
    // === Phase 1: Scan runs ===
    reporter.report(Progress::PhaseStart {
        name: "Scanning runs",
    });
    let scan = scanner::scan(config, reporter)?;
    reporter.report(Progress::PhaseFinish);
    info!(
        "Scan complete: {} run(s), {} record(s), {} anomal{}.",
        scan.runs_scanned,
        scan.records.len(),
        scan.anomalies.len(),
        if scan.anomalies.len() == 1 { "y" } else { "ies" }
    );

    // === Phase 2: Write report ===
    reporter.report(Progress::PhaseStart {
        name: "Writing report",
    });
    report::write_to_path(&scan.records, &config.output_path)?;
    reporter.report(Progress::PhaseFinish);
    info!("Report written to '{}'.", config.output_path.display());

    // === Phase 3: Render heatmap (best effort) ===
    let heatmap = match &config.heatmap_path {
        Some(path) => {
            reporter.report(Progress::PhaseStart {
                name: "Rendering heatmap",
            });
            let status = render_heatmap(&scan.records, path);
            reporter.report(Progress::PhaseFinish);
            status
        }
        None => HeatmapStatus::Disabled,
    };

    Ok(ScreenOutcome {
        records: scan.records,
        anomalies: scan.anomalies,
        runs_scanned: scan.runs_scanned,
        report_path: config.output_path.clone(),
        heatmap,
    })
}

fn render_heatmap(records: &[DdgRecord], path: &Path) -> HeatmapStatus {
    match heatmap::render_to_path(records, path) {
        Ok(()) => {
            info!("Heatmap written to '{}'.", path.display());
            HeatmapStatus::Written(path.to_path_buf())
        }
        Err(e) => {
            warn!("Heatmap generation failed for '{}': {}", path.display(), e);
            HeatmapStatus::Failed(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::ScreenConfigBuilder;
    use crate::engine::scanner::ScanError;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn missing_root_fails_without_writing_report() {
        let dir = tempdir().unwrap();
        let config = ScreenConfigBuilder::new()
            .root_dir(dir.path().join("absent"))
            .output_path(dir.path().join("report.csv"))
            .build()
            .unwrap();

        let result = run(&config, &ProgressReporter::new());
        assert!(matches!(
            result,
            Err(EngineError::Scan {
                source: ScanError::RootNotFound { .. }
            })
        ));
        assert!(!dir.path().join("report.csv").exists());
    }

    #[test]
    fn empty_tree_writes_header_only_report_and_heatmap_fails_softly() {
        let dir = tempdir().unwrap();
        let config = ScreenConfigBuilder::new()
            .root_dir(dir.path())
            .build()
            .unwrap();

        let outcome = run(&config, &ProgressReporter::new()).unwrap();

        assert_eq!(outcome.runs_scanned, 0);
        assert!(outcome.records.is_empty());
        assert!(matches!(outcome.heatmap, HeatmapStatus::Failed(_)));
        let content = fs::read_to_string(&outcome.report_path).unwrap();
        assert_eq!(content, "run_name,mutation,WT_avg,MUT_avg,ddG,effect\n");
    }

    #[test]
    fn unwritable_report_destination_is_fatal() {
        let dir = tempdir().unwrap();
        let config = ScreenConfigBuilder::new()
            .root_dir(dir.path())
            .output_path(dir.path().join("missing_dir").join("report.csv"))
            .render_heatmap(false)
            .build()
            .unwrap();

        let result = run(&config, &ProgressReporter::new());
        assert!(matches!(result, Err(EngineError::Report { .. })));
    }

    #[test]
    fn disabled_heatmap_is_not_rendered() {
        let dir = tempdir().unwrap();
        let run_dir = dir.path().join("run_A");
        fs::create_dir_all(&run_dir).unwrap();
        fs::write(
            run_dir.join("manual_mutation.ddg"),
            "WT: -5.00\nMUT_X10S: -6.50\n",
        )
        .unwrap();
        let config = ScreenConfigBuilder::new()
            .root_dir(dir.path())
            .render_heatmap(false)
            .build()
            .unwrap();

        let outcome = run(&config, &ProgressReporter::new()).unwrap();
        assert_eq!(outcome.heatmap, HeatmapStatus::Disabled);
        assert!(!dir.path().join("ddg_heatmap.svg").exists());
    }
}
