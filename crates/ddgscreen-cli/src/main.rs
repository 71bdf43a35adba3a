mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod utils;

use crate::cli::Cli;
use crate::error::Result;
use clap::Parser;
use tracing::{debug, error, info};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())?;

    let (panic_hook, _) = color_eyre::config::HookBuilder::default().into_hooks();
    std::panic::set_hook(Box::new(move |pi| {
        error!("{}", panic_hook.panic_report(pi));
    }));

    info!("🚀 DDG Screen v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    // Only a missing report fails the process; skipped runs and heatmap failures do not.
    match commands::screen::run(&cli) {
        Ok(outcome) => {
            info!(
                "✅ Screen completed: {} record(s), {} skipped run(s).",
                outcome.records.len(),
                outcome.anomalies.len()
            );
            Ok(())
        }
        Err(e) => {
            error!("❌ Screen failed: {}", e);
            Err(e)
        }
    }
}
