use crate::cli::Cli;
use crate::config::PartialScreenConfig;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use ddgscreen::engine::progress::ProgressReporter;
use ddgscreen::workflows::screen::{self, HeatmapStatus, ScreenOutcome};
use tracing::info;

pub fn run(args: &Cli) -> Result<ScreenOutcome> {
    let partial_config = PartialScreenConfig::load(args.config.as_deref())?;
    info!("Merging configuration from file and CLI arguments...");
    let config = partial_config.merge_with_cli(args)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!("Scanning {} for ddG runs...", config.root_dir.display());
    info!("Invoking the screen workflow...");
    let outcome = screen::run(&config, &reporter)?;

    print_summary(&outcome);
    Ok(outcome)
}

fn print_summary(outcome: &ScreenOutcome) {
    println!(
        "✓ {} ΔΔG record(s) from {} run(s) written to: {}",
        outcome.records.len(),
        outcome.runs_scanned,
        outcome.report_path.display()
    );

    if !outcome.anomalies.is_empty() {
        println!("⚠ {} run(s) skipped:", outcome.anomalies.len());
        for anomaly in &outcome.anomalies {
            println!("  {}", anomaly);
        }
    }

    match &outcome.heatmap {
        HeatmapStatus::Written(path) => println!("✓ Heatmap saved to: {}", path.display()),
        HeatmapStatus::Failed(reason) => println!("⚠ Heatmap generation failed: {}", reason),
        HeatmapStatus::Disabled => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use clap::Parser;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn run_writes_report_and_keeps_anomalies_non_fatal() {
        let dir = tempdir().unwrap();
        for (name, content) in [
            ("run_A", "WT: -5.00\nWT: -5.20\nMUT_X10S: -6.50\n"),
            ("run_B", "MUT_Y20T: -3.00\n"),
        ] {
            let run_dir = dir.path().join(name);
            fs::create_dir_all(&run_dir).unwrap();
            fs::write(run_dir.join("manual_mutation.ddg"), content).unwrap();
        }
        let root = dir.path().to_str().unwrap();
        let cli = Cli::parse_from(["ddgscreen", root, "--no-heatmap"]);

        let outcome = run(&cli).unwrap();

        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.anomalies.len(), 1);
        assert_eq!(outcome.heatmap, HeatmapStatus::Disabled);
        assert!(dir.path().join("all_ddg_results.csv").is_file());
    }

    #[test]
    fn run_fails_for_missing_root() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("absent");
        let cli = Cli::parse_from(["ddgscreen", missing.to_str().unwrap()]);

        let result = run(&cli);
        assert!(matches!(result, Err(CliError::Engine(_))));
    }
}
