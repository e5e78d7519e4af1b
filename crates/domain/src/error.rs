//! Domain error types

use thiserror::Error;

/// Domain-level errors raised while building requests or reading responses.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The provided URL is invalid or malformed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The HTTP method is not supported.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// The request body could not be encoded.
    #[error("invalid body: {0}")]
    InvalidBody(String),

    /// The response body is not the JSON document the caller expected.
    #[error("response body is not valid JSON: {0}")]
    InvalidJson(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
