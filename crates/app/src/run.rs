//! The `run` command.

use std::fmt;

use anyhow::{Context, Result};
use apiprobe_application::ApiClient;
use apiprobe_domain::report::TestStatus;
use apiprobe_infrastructure::config::checked_url;
use apiprobe_infrastructure::{
    HarnessConfig, ReqwestHttpClient, ResultsWriter, SchemaRegistry, SuiteExecutor, TestRunner,
    load_suites,
};
use tracing::info;

use crate::allure::{self, ReportOutcome};
use crate::cli::RunArgs;

/// Case counts of one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Cases whose assertions all held.
    pub passed: usize,
    /// Cases with a failed assertion.
    pub failed: usize,
    /// Cases that could not be evaluated.
    pub broken: usize,
    /// Cases not run.
    pub skipped: usize,
}

impl RunSummary {
    /// Total number of cases.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.passed + self.failed + self.broken + self.skipped
    }

    /// True when nothing failed or broke.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.failed == 0 && self.broken == 0
    }

    fn record(&mut self, status: TestStatus) {
        match status {
            TestStatus::Passed => self.passed += 1,
            TestStatus::Failed => self.failed += 1,
            TestStatus::Broken => self.broken += 1,
            TestStatus::Skipped => self.skipped += 1,
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} cases: {} passed, {} failed, {} broken",
            self.total(),
            self.passed,
            self.failed,
            self.broken
        )
    }
}

/// Applies command-line overrides on top of `config`.
///
/// # Errors
///
/// Returns an error if `--base-url` is not an absolute http(s) URL.
pub fn merge_config(mut config: HarnessConfig, args: &RunArgs) -> Result<HarnessConfig> {
    if let Some(url) = &args.base_url {
        config.base_url = checked_url("--base-url", url.clone())?;
    }
    if let Some(dir) = &args.schemas {
        config.schemas_dir.clone_from(dir);
    }
    if let Some(dir) = &args.results {
        config.results_dir.clone_from(dir);
    }
    if let Some(ms) = args.timeout_ms {
        config.timeout_ms = ms;
    }
    Ok(config)
}

/// Runs every suite under `args.suites` and writes one result per case.
///
/// # Errors
///
/// Returns an error if the results directory cannot be prepared, a suite
/// file cannot be loaded, or a result cannot be written. Failing cases are
/// not errors; they are counted in the summary.
pub async fn run(args: &RunArgs, config: HarnessConfig) -> Result<RunSummary> {
    let config = merge_config(config, args)?;
    info!(
        base_url = %config.base_url,
        suites = %args.suites.display(),
        schemas = %config.schemas_dir.display(),
        "starting run"
    );

    let writer = ResultsWriter::new(&config.results_dir);
    writer
        .prepare()
        .await
        .with_context(|| format!("preparing {}", config.results_dir.display()))?;

    let suites = load_suites(&args.suites)
        .await
        .with_context(|| format!("loading suites from {}", args.suites.display()))?;

    let http = ReqwestHttpClient::new().context("creating HTTP client")?;
    let client = ApiClient::new(&config.base_url, http).with_timeout_ms(config.timeout_ms);
    let runner = TestRunner::new(SchemaRegistry::new(&config.schemas_dir))
        .with_stop_on_failure(args.stop_on_failure);
    let executor = SuiteExecutor::new(client, runner);

    let mut summary = RunSummary::default();
    for suite in &suites {
        for result in executor.run_suite(suite).await {
            println!("[{:?}] {} / {}", result.status, suite.name, result.name);
            if let Some(message) = result.message.as_deref().filter(|_| result.status.is_failure()) {
                println!("    {}", message.replace('\n', "\n    "));
            }
            writer
                .write(&result)
                .await
                .with_context(|| format!("writing result for {}", result.name))?;
            summary.record(result.status);
        }
    }

    if args.generate_report {
        match allure::generate(&config.results_dir, &args.report_dir)? {
            ReportOutcome::Generated => {
                println!("Allure report generated at: {}", args.report_dir.display());
            }
            ReportOutcome::CliMissing => {
                println!(
                    "Allure CLI not installed. Results saved to {}",
                    config.results_dir.display()
                );
            }
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::path::PathBuf;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn flags_override_config() {
        let args = RunArgs {
            base_url: Some("http://localhost:3000/".to_string()),
            results: Some(PathBuf::from("out")),
            timeout_ms: Some(750),
            ..RunArgs::default()
        };
        let config = merge_config(HarnessConfig::default(), &args).unwrap();

        assert_eq!(config.base_url, "http://localhost:3000/");
        assert_eq!(config.results_dir, PathBuf::from("out"));
        assert_eq!(config.timeout_ms, 750);
        assert_eq!(config.schemas_dir, HarnessConfig::default().schemas_dir);
    }

    #[test]
    fn relative_base_url_is_rejected() {
        let args = RunArgs {
            base_url: Some("localhost".to_string()),
            ..RunArgs::default()
        };
        assert!(merge_config(HarnessConfig::default(), &args).is_err());
    }

    #[test]
    fn summary_counts_and_success() {
        let mut summary = RunSummary::default();
        summary.record(TestStatus::Passed);
        summary.record(TestStatus::Passed);
        assert!(summary.is_success());

        summary.record(TestStatus::Broken);
        assert!(!summary.is_success());
        assert_eq!(summary.to_string(), "3 cases: 2 passed, 0 failed, 1 broken");
    }
}
