//! Checks on a whole HTTP response.

use apiprobe_application::ReportSink;
use apiprobe_domain::report::Attachment;
use apiprobe_domain::response::{ResponseSpec, truncate_chars};
use apiprobe_domain::{AssertionFailure, AssertionOutcome};
use serde_json::json;

use crate::serialization::to_attachment_json;

/// Name of the attachment recorded by every status-code check.
pub const RESPONSE_DETAILS: &str = "Response Details";

const DETAILS_BODY_CHARS: usize = 1000;
const MESSAGE_BODY_CHARS: usize = 200;

/// Builds the "Response Details" attachment: status, URL, headers and the
/// first 1000 characters of the body.
#[must_use]
pub fn response_details(response: &ResponseSpec) -> Attachment {
    let details = json!({
        "status_code": response.status,
        "url": response.url,
        "headers": response.headers,
        "body": truncate_chars(&response.body, DETAILS_BODY_CHARS),
    });
    Attachment::json(RESPONSE_DETAILS, to_attachment_json(&details))
}

/// Asserts the response status equals `expected`.
///
/// The response details are attached before the comparison, so they are in
/// the report whether or not the check passes.
///
/// # Errors
///
/// Returns an [`AssertionFailure`] naming both codes, the URL and the start
/// of the body.
pub fn assert_status_code(
    response: &ResponseSpec,
    expected: u16,
    report: &dyn ReportSink,
) -> AssertionOutcome {
    report.attach(response_details(response));

    let actual = response.status;
    if actual == expected {
        return Ok(());
    }
    Err(AssertionFailure::new(format!(
        "Expected status code {expected}, but got {actual}. URL: {}, Response: {}",
        response.url,
        response.body_excerpt(MESSAGE_BODY_CHARS)
    ))
    .with_values(expected.to_string(), actual.to_string()))
}

/// Asserts the response arrived within `max_seconds`. A response taking
/// exactly the limit passes.
///
/// # Errors
///
/// Returns an [`AssertionFailure`] with the measured time.
pub fn assert_response_time(response: &ResponseSpec, max_seconds: f64) -> AssertionOutcome {
    let actual = response.elapsed_secs();
    if actual <= max_seconds {
        return Ok(());
    }
    Err(AssertionFailure::new(format!(
        "Response took {actual:.2}s, expected under {max_seconds:?}s"
    ))
    .with_values(format!("<= {max_seconds:?}s"), format!("{actual:.2}s")))
}
