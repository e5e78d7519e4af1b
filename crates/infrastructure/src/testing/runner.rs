//! Test runner implementation.
//!
//! Evaluates a case's declarative assertions against the response it got,
//! recording diagnostics in the case's report.

use std::time::Instant;

use apiprobe_application::ReportSink;
use apiprobe_domain::response::{ResponseSpec, truncate_chars};
use apiprobe_domain::testing::{
    Assertion, AssertionResult, CaseResults, ComparisonOperator, StatusExpectation, TestCase,
};
use regex::Regex;
use serde_json::Value;

use super::json_path;
use crate::assertions::{
    assert_contains_keys, assert_json_schema, assert_not_empty, assert_response_time,
    assert_status_code, response_details,
};
use crate::error::{HarnessError, HarnessResult};
use crate::schema::SchemaRegistry;

const PREVIEW_CHARS: usize = 100;

/// Test runner that executes assertions against responses.
#[derive(Debug, Default)]
pub struct TestRunner {
    /// Whether to stop on first failure.
    stop_on_failure: bool,
    schemas: SchemaRegistry,
}

impl TestRunner {
    /// Create a runner resolving schema names in `schemas`.
    #[must_use]
    pub const fn new(schemas: SchemaRegistry) -> Self {
        Self {
            stop_on_failure: false,
            schemas,
        }
    }

    /// Set whether to stop on first failure.
    #[must_use]
    pub const fn with_stop_on_failure(mut self, stop: bool) -> Self {
        self.stop_on_failure = stop;
        self
    }

    /// The registry schema assertions resolve against.
    #[must_use]
    pub const fn schemas(&self) -> &SchemaRegistry {
        &self.schemas
    }

    /// Run every assertion of `case` against `response`.
    ///
    /// # Errors
    ///
    /// Returns a harness error (missing or invalid schema) as soon as one
    /// occurs; such a case cannot be judged passed or failed.
    #[allow(clippy::cast_possible_truncation)]
    pub fn run(
        &self,
        case: &TestCase,
        response: &ResponseSpec,
        report: &dyn ReportSink,
    ) -> HarnessResult<CaseResults> {
        let start = Instant::now();
        let mut results = Vec::with_capacity(case.assertions.len());

        for assertion in &case.assertions {
            let result = self.run_assertion(assertion, response, report)?;
            let failed = !result.passed;
            results.push(result);

            if failed && (self.stop_on_failure || case.stop_on_failure) {
                break;
            }
        }

        let duration_ms = start.elapsed().as_millis() as u64;
        Ok(CaseResults::new(&case.name, results, duration_ms))
    }

    /// Run a single assertion against a response.
    ///
    /// # Errors
    ///
    /// Returns a harness error for schema assertions whose schema cannot be
    /// loaded or compiled.
    pub fn run_assertion(
        &self,
        assertion: &Assertion,
        response: &ResponseSpec,
        report: &dyn ReportSink,
    ) -> HarnessResult<AssertionResult> {
        let result = match assertion {
            Assertion::StatusCode { expected } => {
                Self::check_status_code(assertion, response, expected, report)
            }
            Assertion::ResponseTime { max_ms } => {
                Self::check_response_time(assertion, response, *max_ms)
            }
            Assertion::JsonSchema { schema, path } => {
                return Self::check_json(assertion, response, path.as_deref(), |data| {
                    assert_json_schema(data, schema, &self.schemas, report)
                });
            }
            Assertion::ContainsKeys { keys, path } => {
                return Self::check_json(assertion, response, path.as_deref(), |data| {
                    Ok(assert_contains_keys(data, keys.as_slice())?)
                });
            }
            Assertion::NotEmpty { path } => {
                return Self::check_json(assertion, response, path.as_deref(), |data| {
                    Ok(assert_not_empty(data)?)
                });
            }
            Assertion::HeaderExists { name, value } => {
                Self::check_header_exists(assertion, response, name, value.as_deref())
            }
            Assertion::ContentType { expected } => {
                Self::check_content_type(assertion, response, expected)
            }
            Assertion::BodyContains { text, ignore_case } => {
                Self::check_body_contains(assertion, response, text, *ignore_case)
            }
            Assertion::IsJson => Self::check_is_json(assertion, response),
            Assertion::JsonPath { path, expected } => {
                Self::check_json_path(assertion, response, path, expected.as_ref())
            }
            Assertion::JsonPathMatches {
                path,
                operator,
                value,
            } => Self::check_json_path_matches(assertion, response, path, *operator, value),
            Assertion::BodyLength { operator, length } => {
                Self::check_body_length(assertion, response, *operator, *length)
            }
        };
        Ok(result)
    }

    fn check_status_code(
        assertion: &Assertion,
        response: &ResponseSpec,
        expected: &StatusExpectation,
        report: &dyn ReportSink,
    ) -> AssertionResult {
        let actual = response.status;
        let outcome = match expected {
            StatusExpectation::Exact(code) => assert_status_code(response, *code, report)
                .map_err(|failure| failure.message().to_string()),
            other => {
                report.attach(response_details(response));
                if other.matches(actual) {
                    Ok(())
                } else {
                    Err(format!(
                        "Expected status {}, but got {actual}. URL: {}",
                        other.description(),
                        response.url
                    ))
                }
            }
        };

        match outcome {
            Ok(()) => AssertionResult::pass_with_value(assertion.clone(), actual.to_string()),
            Err(message) => AssertionResult::fail_with_value(assertion.clone(), actual.to_string(), message),
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn check_response_time(
        assertion: &Assertion,
        response: &ResponseSpec,
        max_ms: u64,
    ) -> AssertionResult {
        let actual = format!("{}ms", response.duration.as_millis());
        match assert_response_time(response, max_ms as f64 / 1000.0) {
            Ok(()) => AssertionResult::pass_with_value(assertion.clone(), actual),
            Err(failure) => AssertionResult::fail_with_value(assertion.clone(), actual, failure.message()),
        }
    }

    /// Parses the body (blank reads as `{}`), selects `path` and hands the
    /// value to `check`. Assertion failures become failed results; harness
    /// errors propagate.
    fn check_json<F>(
        assertion: &Assertion,
        response: &ResponseSpec,
        path: Option<&str>,
        check: F,
    ) -> HarnessResult<AssertionResult>
    where
        F: FnOnce(&Value) -> HarnessResult<()>,
    {
        let json = match response.json_or_empty() {
            Ok(json) => json,
            Err(e) => {
                return Ok(AssertionResult::fail(
                    assertion.clone(),
                    format!("Failed to parse body as JSON: {e}"),
                ));
            }
        };

        let target = match path {
            None => &json,
            Some(path) => match json_path::query(&json, path) {
                Ok(Some(value)) => value,
                Ok(None) => {
                    return Ok(AssertionResult::fail(
                        assertion.clone(),
                        format!("JSON path '{path}' not found"),
                    ));
                }
                Err(e) => {
                    return Ok(AssertionResult::fail(
                        assertion.clone(),
                        format!("Invalid JSON path '{path}': {e}"),
                    ));
                }
            },
        };

        match check(target) {
            Ok(()) => Ok(AssertionResult::pass(assertion.clone())),
            Err(HarnessError::Assertion(failure)) => {
                Ok(AssertionResult::fail(assertion.clone(), failure.message()))
            }
            Err(harness) => Err(harness),
        }
    }

    fn check_header_exists(
        assertion: &Assertion,
        response: &ResponseSpec,
        name: &str,
        expected_value: Option<&str>,
    ) -> AssertionResult {
        match (response.get_header(name), expected_value) {
            (None, _) => AssertionResult::fail(assertion.clone(), format!("Header '{name}' not found")),
            (Some(actual), Some(expected)) if actual != expected => AssertionResult::fail_with_value(
                assertion.clone(),
                actual.clone(),
                format!("Header '{name}' value mismatch: expected '{expected}', got '{actual}'"),
            ),
            (Some(actual), _) => AssertionResult::pass_with_value(assertion.clone(), actual.clone()),
        }
    }

    fn check_content_type(
        assertion: &Assertion,
        response: &ResponseSpec,
        expected: &str,
    ) -> AssertionResult {
        match &response.content_type {
            Some(actual) if actual.contains(expected) => {
                AssertionResult::pass_with_value(assertion.clone(), actual.clone())
            }
            Some(actual) => AssertionResult::fail_with_value(
                assertion.clone(),
                actual.clone(),
                format!("Content-Type '{actual}' does not contain '{expected}'"),
            ),
            None => AssertionResult::fail(assertion.clone(), "No Content-Type header present"),
        }
    }

    fn check_body_contains(
        assertion: &Assertion,
        response: &ResponseSpec,
        text: &str,
        ignore_case: bool,
    ) -> AssertionResult {
        let body = &response.body;
        let contains = if ignore_case {
            body.to_lowercase().contains(&text.to_lowercase())
        } else {
            body.contains(text)
        };

        if contains {
            AssertionResult::pass(assertion.clone())
        } else {
            AssertionResult::fail_with_value(
                assertion.clone(),
                preview(body),
                format!("Body does not contain '{text}'"),
            )
        }
    }

    fn check_is_json(assertion: &Assertion, response: &ResponseSpec) -> AssertionResult {
        match response.json() {
            Ok(_) => AssertionResult::pass(assertion.clone()),
            Err(e) => AssertionResult::fail(assertion.clone(), format!("Body is not valid JSON: {e}")),
        }
    }

    fn check_json_path(
        assertion: &Assertion,
        response: &ResponseSpec,
        path: &str,
        expected: Option<&Value>,
    ) -> AssertionResult {
        let json = match response.json() {
            Ok(json) => json,
            Err(e) => {
                return AssertionResult::fail(assertion.clone(), format!("Failed to parse body as JSON: {e}"));
            }
        };

        match json_path::query(&json, path) {
            Ok(Some(value)) => match expected {
                Some(expected) if value != expected => AssertionResult::fail_with_value(
                    assertion.clone(),
                    value.to_string(),
                    format!("JSON path '{path}' value mismatch: expected {expected}, got {value}"),
                ),
                _ => AssertionResult::pass_with_value(assertion.clone(), value.to_string()),
            },
            Ok(None) => AssertionResult::fail(assertion.clone(), format!("JSON path '{path}' not found")),
            Err(e) => AssertionResult::fail(assertion.clone(), format!("Invalid JSON path '{path}': {e}")),
        }
    }

    fn check_json_path_matches(
        assertion: &Assertion,
        response: &ResponseSpec,
        path: &str,
        operator: ComparisonOperator,
        expected: &Value,
    ) -> AssertionResult {
        let json = match response.json() {
            Ok(json) => json,
            Err(e) => {
                return AssertionResult::fail(assertion.clone(), format!("Failed to parse body as JSON: {e}"));
            }
        };

        match json_path::query(&json, path) {
            Ok(Some(value)) if compare_json_values(value, operator, expected) => {
                AssertionResult::pass_with_value(assertion.clone(), value.to_string())
            }
            Ok(Some(value)) => AssertionResult::fail_with_value(
                assertion.clone(),
                value.to_string(),
                format!(
                    "JSON path '{path}' comparison failed: {value} {} {expected}",
                    operator.symbol()
                ),
            ),
            Ok(None) => AssertionResult::fail(assertion.clone(), format!("JSON path '{path}' not found")),
            Err(e) => AssertionResult::fail(assertion.clone(), format!("Invalid JSON path '{path}': {e}")),
        }
    }

    fn check_body_length(
        assertion: &Assertion,
        response: &ResponseSpec,
        operator: ComparisonOperator,
        expected_length: usize,
    ) -> AssertionResult {
        let actual_length = match response.json() {
            Ok(Value::Array(items)) => items.len(),
            _ => response.body.len(),
        };

        if operator.compare_len(actual_length, expected_length) {
            AssertionResult::pass_with_value(assertion.clone(), actual_length.to_string())
        } else {
            AssertionResult::fail_with_value(
                assertion.clone(),
                actual_length.to_string(),
                format!(
                    "Body length {actual_length} does not {} {expected_length}",
                    operator.symbol()
                ),
            )
        }
    }
}

fn preview(body: &str) -> String {
    let head = truncate_chars(body, PREVIEW_CHARS);
    if head.len() < body.len() {
        format!("{head}...")
    } else {
        head.to_string()
    }
}

/// Compare two JSON values using the given operator.
fn compare_json_values(actual: &Value, operator: ComparisonOperator, expected: &Value) -> bool {
    match operator {
        ComparisonOperator::Equals => actual == expected,
        ComparisonOperator::NotEquals => actual != expected,
        ComparisonOperator::GreaterThan => compare_numeric(actual, expected, |a, b| a > b),
        ComparisonOperator::GreaterThanOrEqual => compare_numeric(actual, expected, |a, b| a >= b),
        ComparisonOperator::LessThan => compare_numeric(actual, expected, |a, b| a < b),
        ComparisonOperator::LessThanOrEqual => compare_numeric(actual, expected, |a, b| a <= b),
        ComparisonOperator::Contains => match (actual, expected) {
            (Value::String(s), Value::String(needle)) => s.contains(needle.as_str()),
            (Value::Array(arr), _) => arr.contains(expected),
            _ => false,
        },
        ComparisonOperator::Matches => {
            if let (Value::String(s), Value::String(pattern)) = (actual, expected) {
                Regex::new(pattern).is_ok_and(|re| re.is_match(s))
            } else {
                false
            }
        }
    }
}

fn compare_numeric<F>(actual: &Value, expected: &Value, cmp: F) -> bool
where
    F: Fn(f64, f64) -> bool,
{
    match (actual.as_f64(), expected.as_f64()) {
        (Some(a), Some(b)) => cmp(a, b),
        _ => false,
    }
}
