//! HTML report rendering through the external `allure` CLI.

use std::io::ErrorKind;
use std::path::Path;
use std::process::Command;

use anyhow::{Result, bail};
use tracing::{info, warn};

/// What happened when report generation was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportOutcome {
    /// The report was written.
    Generated,
    /// No `allure` executable on `PATH`.
    CliMissing,
}

/// Runs `allure generate <results> --output <report> --clean`.
///
/// # Errors
///
/// Returns an error if the CLI is present but exits unsuccessfully or
/// cannot be started for a reason other than being absent.
pub fn generate(results_dir: &Path, report_dir: &Path) -> Result<ReportOutcome> {
    generate_with("allure", results_dir, report_dir)
}

fn generate_with(program: &str, results_dir: &Path, report_dir: &Path) -> Result<ReportOutcome> {
    let status = Command::new(program)
        .arg("generate")
        .arg(results_dir)
        .arg("--output")
        .arg(report_dir)
        .arg("--clean")
        .status();

    match status {
        Ok(status) if status.success() => {
            info!(report = %report_dir.display(), "report generated");
            Ok(ReportOutcome::Generated)
        }
        Ok(status) => bail!("{program} generate exited with {status}"),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(program, "report CLI not found");
            Ok(ReportOutcome::CliMissing)
        }
        Err(e) => bail!("failed to start {program}: {e}"),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn missing_cli_is_reported_not_raised() {
        let outcome = generate_with(
            "apiprobe-no-such-report-cli",
            Path::new("results"),
            Path::new("report"),
        )
        .unwrap();
        assert_eq!(outcome, ReportOutcome::CliMissing);
    }
}
