//! Command-line surface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Default directory suite files are read from.
pub const DEFAULT_SUITES_DIR: &str = "suites";
/// Default output directory of the generated HTML report.
pub const DEFAULT_REPORT_DIR: &str = "reports/allure-report";

/// Declarative API test runner.
#[derive(Parser, Debug)]
#[command(name = "apiprobe", author, version, about, long_about = None)]
pub struct Cli {
    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run every suite file in a directory and write Allure results.
    Run(RunArgs),
}

/// Options of `apiprobe run`. Unset options fall back to the `APIPROBE_*`
/// environment and then to the built-in defaults.
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Directory of `.yaml`/`.json` suite files.
    #[arg(long, env = "APIPROBE_SUITES_DIR", default_value = DEFAULT_SUITES_DIR)]
    pub suites: PathBuf,

    /// Base URL of the API under test.
    #[arg(long)]
    pub base_url: Option<String>,

    /// Directory of `<name>.json` schema files.
    #[arg(long)]
    pub schemas: Option<PathBuf>,

    /// Directory results are written to. Cleared before the run.
    #[arg(long)]
    pub results: Option<PathBuf>,

    /// Per-request timeout in milliseconds.
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_ms: Option<u64>,

    /// Stop evaluating a case at its first failed assertion.
    #[arg(long)]
    pub stop_on_failure: bool,

    /// Render an HTML report with the `allure` CLI after the run.
    #[arg(long)]
    pub generate_report: bool,

    /// Output directory for `--generate-report`.
    #[arg(long, env = "APIPROBE_REPORT_DIR", default_value = DEFAULT_REPORT_DIR)]
    pub report_dir: PathBuf,
}
