//! Declarative suites: loading, evaluation and execution.

mod executor;
pub mod json_path;
mod runner;
mod suite_loader;

pub use executor::{ASSERTION_RESULTS, SuiteExecutor};
pub use runner::TestRunner;
pub use suite_loader::{SuiteError, load_suite, load_suites};
