//! apiprobe infrastructure - adapters, assertions and reporting
//!
//! This crate provides:
//! - The reqwest implementation of the `HttpClient` port
//! - The assertion library and named JSON Schema contracts
//! - Per-case reports and the results directory writer
//! - Declarative suite loading and execution
//! - Configuration from `APIPROBE_*` environment variables

pub mod adapters;
pub mod assertions;
pub mod config;
pub mod error;
pub mod report;
pub mod schema;
pub mod serialization;
pub mod testing;

pub use adapters::ReqwestHttpClient;
pub use assertions::{
    Checker, assert_contains_keys, assert_json_schema, assert_not_empty, assert_response_time,
    assert_status_code,
};
pub use config::{ConfigError, HarnessConfig};
pub use error::{HarnessError, HarnessResult};
pub use report::{NullReport, ReportError, ResultsWriter, TestCaseResult, TestReport};
pub use schema::SchemaRegistry;
pub use serialization::{SerializationError, from_document, from_json, to_json_stable};
pub use testing::{SuiteError, SuiteExecutor, TestRunner, load_suite, load_suites};
