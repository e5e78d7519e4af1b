//! apiprobe - command-line runner for declarative API test suites.

mod allure;
pub mod cli;
mod run;

pub use allure::ReportOutcome;
pub use cli::{Cli, Command, RunArgs};
pub use run::{RunSummary, merge_config, run};
