//! Test reporting: per-case attachment recording and the results directory.

mod recorder;
mod writer;

pub use recorder::{NullReport, TestCaseResult, TestReport};
pub use writer::{DEFAULT_RESULTS_DIR, ReportError, ResultsWriter};
