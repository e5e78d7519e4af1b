//! HTTPBin client, used to provoke arbitrary status codes.

use apiprobe_domain::response::ResponseSpec;
use serde_json::Value;

use super::ApiClient;
use crate::error::ApplicationResult;
use crate::ports::HttpClient;

/// Public base URL of HTTPBin.
pub const HTTPBIN_URL: &str = "https://httpbin.org";

/// Client for the HTTPBin echo service.
#[derive(Debug, Clone)]
pub struct HttpBinClient<C> {
    api: ApiClient<C>,
}

impl<C: HttpClient> HttpBinClient<C> {
    /// Creates a client against the public service.
    #[must_use]
    pub fn new(http: C) -> Self {
        Self::with_base_url(HTTPBIN_URL, http)
    }

    /// Creates a client against another HTTPBin deployment.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>, http: C) -> Self {
        Self {
            api: ApiClient::new(base_url, http),
        }
    }

    /// The underlying session.
    #[must_use]
    pub const fn api(&self) -> &ApiClient<C> {
        &self.api
    }

    /// Requests a response with the given status code.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure.
    pub async fn get_status_code(&self, code: u16) -> ApplicationResult<ResponseSpec> {
        self.api.get(&format!("status/{code}")).await
    }

    /// Posts `data` and gets it echoed back under `json`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure.
    pub async fn post_echo(&self, data: &Value) -> ApplicationResult<ResponseSpec> {
        self.api.post("post", data).await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::clients::base::tests::RecordingClient;

    #[tokio::test]
    async fn status_endpoint_carries_the_code() {
        let client = HttpBinClient::with_base_url("http://localhost:9", RecordingClient::answering(500, ""));
        let response = client.get_status_code(500).await.unwrap();
        assert_eq!(response.status, 500);
        assert_eq!(client.api().http().last().url, "http://localhost:9/status/500");
    }
}
