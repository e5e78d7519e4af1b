//! Base API client
//!
//! Joins endpoints onto a base URL and forwards requests to the
//! [`HttpClient`] port. Responses come back untouched: checking them is the
//! job of the assertion library.

use apiprobe_domain::request::{DEFAULT_TIMEOUT_MS, HttpMethod, RequestBody, RequestSpec};
use apiprobe_domain::response::ResponseSpec;
use serde_json::Value;
use tracing::debug;

use crate::error::ApplicationResult;
use crate::ports::HttpClient;

/// HTTP session bound to one base URL.
#[derive(Debug, Clone)]
pub struct ApiClient<C> {
    base_url: String,
    http: C,
    timeout_ms: u64,
}

impl<C: HttpClient> ApiClient<C> {
    /// Creates a client for `base_url`. A trailing `/` is ignored.
    #[must_use]
    pub fn new(base_url: impl Into<String>, http: C) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Sets the per-request transport timeout (builder pattern).
    #[must_use]
    pub const fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// The base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The transport requests are forwarded to.
    #[must_use]
    pub const fn http(&self) -> &C {
        &self.http
    }

    /// Absolute URL for `endpoint`, which may or may not start with `/`.
    #[must_use]
    pub fn url_for(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    /// Builds a request for `endpoint` with the client's defaults applied.
    #[must_use]
    pub fn request(&self, method: HttpMethod, endpoint: &str) -> RequestSpec {
        RequestSpec::new(method, self.url_for(endpoint))
            .with_header("Accept", "application/json")
            .with_timeout_ms(self.timeout_ms)
    }

    /// Sends a prepared request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails at the transport level.
    pub async fn send(&self, request: RequestSpec) -> ApplicationResult<ResponseSpec> {
        debug!(method = %request.method, url = %request.url, "sending request");
        let response = self.http.execute(&request).await?;
        debug!(
            status = response.status,
            elapsed_ms = response.duration.as_millis(),
            "received response"
        );
        Ok(response)
    }

    /// GET `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails at the transport level.
    pub async fn get(&self, endpoint: &str) -> ApplicationResult<ResponseSpec> {
        self.send(self.request(HttpMethod::Get, endpoint)).await
    }

    /// GET `endpoint` with query parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails at the transport level.
    pub async fn get_with_query(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> ApplicationResult<ResponseSpec> {
        let request = query
            .iter()
            .fold(self.request(HttpMethod::Get, endpoint), |req, (k, v)| {
                req.with_query(*k, v.clone())
            });
        self.send(request).await
    }

    /// POST `body` as JSON to `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be encoded or the request fails
    /// at the transport level.
    pub async fn post(&self, endpoint: &str, body: &Value) -> ApplicationResult<ResponseSpec> {
        let request = self
            .request(HttpMethod::Post, endpoint)
            .with_body(RequestBody::from_value(body)?);
        self.send(request).await
    }

    /// PUT `body` as JSON to `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be encoded or the request fails
    /// at the transport level.
    pub async fn put(&self, endpoint: &str, body: &Value) -> ApplicationResult<ResponseSpec> {
        let request = self
            .request(HttpMethod::Put, endpoint)
            .with_body(RequestBody::from_value(body)?);
        self.send(request).await
    }

    /// DELETE `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails at the transport level.
    pub async fn delete(&self, endpoint: &str) -> ApplicationResult<ResponseSpec> {
        self.send(self.request(HttpMethod::Delete, endpoint)).await
    }
}
