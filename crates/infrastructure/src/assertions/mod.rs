//! Assertion library
//!
//! Free functions returning [`AssertionOutcome`](apiprobe_domain::AssertionOutcome)
//! for response and payload checks, and [`assert_json_schema`] for schema
//! contracts. Checks that record diagnostics take a [`ReportSink`]; the
//! [`Checker`] bundles one with a [`SchemaRegistry`] for test code.

mod payload;
mod response;
mod schema;

use apiprobe_application::ReportSink;
use apiprobe_domain::{AssertionOutcome, ResponseSpec};
use serde_json::Value;

pub use payload::{assert_contains_keys, assert_not_empty};
pub use response::{RESPONSE_DETAILS, assert_response_time, assert_status_code, response_details};
pub use schema::{SCHEMA_VALIDATION, SCHEMA_VALIDATION_FAILURE, assert_json_schema};

use crate::error::HarnessResult;
use crate::schema::SchemaRegistry;

/// The assertion functions bound to one report and one schema directory.
#[derive(Clone, Copy)]
pub struct Checker<'a> {
    report: &'a dyn ReportSink,
    schemas: &'a SchemaRegistry,
}

impl std::fmt::Debug for Checker<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Checker")
            .field("schemas", &self.schemas)
            .finish_non_exhaustive()
    }
}

impl<'a> Checker<'a> {
    /// Binds the checks to `report` and `schemas`.
    #[must_use]
    pub const fn new(report: &'a dyn ReportSink, schemas: &'a SchemaRegistry) -> Self {
        Self { report, schemas }
    }

    /// See [`assert_status_code`].
    ///
    /// # Errors
    ///
    /// Fails when the status differs from `expected`.
    pub fn status_code(&self, response: &ResponseSpec, expected: u16) -> AssertionOutcome {
        assert_status_code(response, expected, self.report)
    }

    /// See [`assert_response_time`].
    ///
    /// # Errors
    ///
    /// Fails when the response was slower than `max_seconds`.
    pub fn response_time(&self, response: &ResponseSpec, max_seconds: f64) -> AssertionOutcome {
        assert_response_time(response, max_seconds)
    }

    /// See [`assert_contains_keys`].
    ///
    /// # Errors
    ///
    /// Fails when a key is missing.
    pub fn contains_keys<K: AsRef<str>>(&self, data: &Value, keys: &[K]) -> AssertionOutcome {
        assert_contains_keys(data, keys)
    }

    /// See [`assert_not_empty`].
    ///
    /// # Errors
    ///
    /// Fails when `data` is empty.
    pub fn not_empty(&self, data: &Value) -> AssertionOutcome {
        assert_not_empty(data)
    }

    /// See [`assert_json_schema`].
    ///
    /// # Errors
    ///
    /// Fails on a mismatch or a missing/invalid schema.
    pub fn json_schema(&self, data: &Value, schema_name: &str) -> HarnessResult<()> {
        assert_json_schema(data, schema_name, self.schemas, self.report)
    }
}
