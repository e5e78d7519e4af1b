//! HTTP Client port

use std::future::Future;

use apiprobe_domain::{request::RequestSpec, response::ResponseSpec};
use thiserror::Error;

/// Port for executing HTTP requests.
///
/// Implementations forward the request and return whatever came back; status
/// codes are never interpreted here.
pub trait HttpClient: Send + Sync {
    /// Executes an HTTP request and returns the full response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails at the transport level
    /// (network issues, timeout, malformed URL).
    fn execute(
        &self,
        request: &RequestSpec,
    ) -> impl Future<Output = Result<ResponseSpec, HttpClientError>> + Send;
}

/// Transport-level failures.
///
/// These abort the test that issued the request and never count as an
/// assertion failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HttpClientError {
    /// The URL could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The request did not complete in time.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout {
        /// The timeout that elapsed.
        timeout_ms: u64,
    },

    /// The host name could not be resolved.
    #[error("could not resolve host '{host}': {message}")]
    DnsError {
        /// Host that failed to resolve.
        host: String,
        /// Underlying error text.
        message: String,
    },

    /// The server refused the connection.
    #[error("connection refused by {host}:{port}")]
    ConnectionRefused {
        /// Target host.
        host: String,
        /// Target port.
        port: u16,
    },

    /// The connection failed for another reason.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The redirect limit was exceeded.
    #[error("too many redirects (max {max})")]
    TooManyRedirects {
        /// Configured redirect limit.
        max: usize,
    },

    /// Any other transport error.
    #[error("{0}")]
    Other(String),
}
