//! Assertion failures.

use thiserror::Error;

/// An expectation about a response or payload did not hold.
///
/// The message is the whole diagnostic: it carries expected and actual values
/// plus whatever context (URL, body excerpt, missing keys, schema name) is
/// needed to debug without rerunning. `expected`/`actual` are kept separately
/// for structured reporting.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct AssertionFailure {
    message: String,
    expected: Option<String>,
    actual: Option<String>,
}

impl AssertionFailure {
    /// Creates a failure with only a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            expected: None,
            actual: None,
        }
    }

    /// Attaches the expected and actual values (builder pattern).
    #[must_use]
    pub fn with_values(mut self, expected: impl Into<String>, actual: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self.actual = Some(actual.into());
        self
    }

    /// The human-readable failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The expected value, when one was recorded.
    #[must_use]
    pub fn expected(&self) -> Option<&str> {
        self.expected.as_deref()
    }

    /// The actual value, when one was recorded.
    #[must_use]
    pub fn actual(&self) -> Option<&str> {
        self.actual.as_deref()
    }
}

/// Result type alias for assertions.
pub type AssertionOutcome = Result<(), AssertionFailure>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_the_message() {
        let failure = AssertionFailure::new("List is empty").with_values("non-empty", "[]");
        assert_eq!(failure.to_string(), "List is empty");
        assert_eq!(failure.expected(), Some("non-empty"));
        assert_eq!(failure.actual(), Some("[]"));
    }
}
