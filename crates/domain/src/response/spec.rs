//! Response specification type
//!
//! Contains the type representing an HTTP response: status, headers, body
//! and timing information.

use std::collections::BTreeMap;
use std::time::Duration;

use serde_json::Value;

use crate::error::{DomainError, DomainResult};

/// HTTP response as received by a test.
///
/// Immutable once built; the test that issued the request owns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseSpec {
    /// HTTP status code.
    pub status: u16,
    /// Final URL of the request that produced this response.
    pub url: String,
    /// Response headers, keyed by the name the server sent.
    pub headers: BTreeMap<String, String>,
    /// Response body as (lossy) UTF-8 text.
    pub body: String,
    /// Response body as raw bytes.
    pub body_bytes: Vec<u8>,
    /// Time from sending the request to receiving the full body.
    pub duration: Duration,
    /// Content-Type header value (extracted for convenience).
    pub content_type: Option<String>,
}

impl ResponseSpec {
    /// Creates a new `ResponseSpec` from raw response data.
    #[must_use]
    pub fn new(
        status: u16,
        url: impl Into<String>,
        headers: BTreeMap<String, String>,
        body: Vec<u8>,
        duration: Duration,
    ) -> Self {
        let content_type = headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("content-type"))
            .map(|(_, v)| v.clone());
        let body_string = String::from_utf8_lossy(&body).into_owned();

        Self {
            status,
            url: url.into(),
            headers,
            body: body_string,
            body_bytes: body,
            duration,
            content_type,
        }
    }

    /// Elapsed time in fractional seconds.
    #[must_use]
    pub fn elapsed_secs(&self) -> f64 {
        self.duration.as_secs_f64()
    }

    /// Returns at most `max_chars` characters of the body.
    #[must_use]
    pub fn body_excerpt(&self, max_chars: usize) -> &str {
        truncate_chars(&self.body, max_chars)
    }

    /// Parses the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidJson`] if the body is not valid JSON.
    pub fn json(&self) -> DomainResult<Value> {
        serde_json::from_slice(&self.body_bytes).map_err(|e| DomainError::InvalidJson(e.to_string()))
    }

    /// Parses the body as JSON, reading an empty or blank body as `{}`.
    ///
    /// DELETE endpoints commonly answer with no content.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidJson`] if a non-blank body is not valid JSON.
    pub fn json_or_empty(&self) -> DomainResult<Value> {
        if self.body.trim().is_empty() {
            return Ok(Value::Object(serde_json::Map::new()));
        }
        self.json()
    }

    /// Returns true if the content type indicates JSON.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.content_type
            .as_ref()
            .is_some_and(|ct| ct.contains("application/json") || ct.contains("+json"))
    }

    /// Gets a header value by name (case-insensitive).
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&String> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    }
}

/// Returns the first `max_chars` characters of `text`, never splitting a
/// multi-byte character.
#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
