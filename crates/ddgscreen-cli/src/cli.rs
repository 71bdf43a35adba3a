use clap::Parser;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "DDG Screen Developers",
    version,
    about = "DDG Screen CLI - Aggregates cartesian ddG mutagenesis runs into a consolidated ΔΔG report and heatmap.",
    help_template = HELP_TEMPLATE,
)]
pub struct Cli {
    /// Root directory of the screening tree; every `run_*` directory below it is scanned.
    #[arg(required = true, value_name = "ROOT_DIR")]
    pub root_dir: PathBuf,

    /// Path to an optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Output Overrides ---
    /// Path for the CSV report. Defaults to `<ROOT_DIR>/all_ddg_results.csv`.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Path for the SVG heatmap. Defaults to `<ROOT_DIR>/ddg_heatmap.svg`.
    #[arg(long, value_name = "PATH")]
    pub heatmap: Option<PathBuf>,

    /// Skip heatmap rendering.
    #[arg(long, conflicts_with = "heatmap")]
    pub no_heatmap: bool,

    // --- Scan Overrides ---
    /// Directory-name prefix that marks a run directory.
    #[arg(long, value_name = "PREFIX")]
    pub run_prefix: Option<String>,

    /// Result file location relative to each run directory.
    #[arg(long, value_name = "NAME")]
    pub result_file: Option<PathBuf>,

    // --- Classification Overrides ---
    /// ΔΔG below this value is classified as stabilizing (kcal/mol).
    #[arg(long, value_name = "FLOAT", allow_negative_numbers = true)]
    pub stabilizing_threshold: Option<f64>,

    /// ΔΔG above this value is classified as destabilizing (kcal/mol).
    #[arg(long, value_name = "FLOAT", allow_negative_numbers = true)]
    pub destabilizing_threshold: Option<f64>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S thresholds.stabilizing=-0.5
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE")]
    pub set_values: Vec<String>,

    // --- Logging ---
    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all console log output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}
