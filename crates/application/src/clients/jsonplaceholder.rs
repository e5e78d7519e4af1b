//! JSONPlaceholder API client.

use apiprobe_domain::response::ResponseSpec;
use serde_json::Value;

use super::ApiClient;
use crate::error::ApplicationResult;
use crate::ports::HttpClient;

/// Public base URL of the JSONPlaceholder fake REST service.
pub const JSONPLACEHOLDER_URL: &str = "https://jsonplaceholder.typicode.com";

/// One method per endpoint of the JSONPlaceholder service.
///
/// Writes are simulated upstream: a created or updated resource is echoed
/// back but never persisted.
#[derive(Debug, Clone)]
pub struct JsonPlaceholderClient<C> {
    api: ApiClient<C>,
}

impl<C: HttpClient> JsonPlaceholderClient<C> {
    /// Creates a client against the public service.
    #[must_use]
    pub fn new(http: C) -> Self {
        Self::with_base_url(JSONPLACEHOLDER_URL, http)
    }

    /// Creates a client against another deployment of the same API.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>, http: C) -> Self {
        Self {
            api: ApiClient::new(base_url, http),
        }
    }

    /// Wraps an already configured [`ApiClient`].
    #[must_use]
    pub const fn from_api(api: ApiClient<C>) -> Self {
        Self { api }
    }

    /// The underlying session.
    #[must_use]
    pub const fn api(&self) -> &ApiClient<C> {
        &self.api
    }

    /// Get all users.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure.
    pub async fn get_users(&self) -> ApplicationResult<ResponseSpec> {
        self.api.get("users").await
    }

    /// Get user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure.
    pub async fn get_user(&self, user_id: u64) -> ApplicationResult<ResponseSpec> {
        self.api.get(&format!("users/{user_id}")).await
    }

    /// Create a new user.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure.
    pub async fn create_user(&self, user_data: &Value) -> ApplicationResult<ResponseSpec> {
        self.api.post("users", user_data).await
    }

    /// Update an existing user.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure.
    pub async fn update_user(&self, user_id: u64, user_data: &Value) -> ApplicationResult<ResponseSpec> {
        self.api.put(&format!("users/{user_id}"), user_data).await
    }

    /// Delete a user. Read the body with
    /// [`ResponseSpec::json_or_empty`], the service answers with `{}` or nothing.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure.
    pub async fn delete_user(&self, user_id: u64) -> ApplicationResult<ResponseSpec> {
        self.api.delete(&format!("users/{user_id}")).await
    }

    /// Get all posts.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure.
    pub async fn get_posts(&self) -> ApplicationResult<ResponseSpec> {
        self.api.get("posts").await
    }

    /// Get post by ID.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure.
    pub async fn get_post(&self, post_id: u64) -> ApplicationResult<ResponseSpec> {
        self.api.get(&format!("posts/{post_id}")).await
    }

    /// Get the posts written by one user.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure.
    pub async fn get_user_posts(&self, user_id: u64) -> ApplicationResult<ResponseSpec> {
        self.api
            .get_with_query("posts", &[("userId", user_id.to_string())])
            .await
    }

    /// Get all comments.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure.
    pub async fn get_comments(&self) -> ApplicationResult<ResponseSpec> {
        self.api.get("comments").await
    }

    /// Get all todos.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure.
    pub async fn get_todos(&self) -> ApplicationResult<ResponseSpec> {
        self.api.get("todos").await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use apiprobe_domain::request::HttpMethod;
    use serde_json::json;

    use super::*;
    use crate::clients::base::tests::RecordingClient;

    fn client(status: u16) -> JsonPlaceholderClient<RecordingClient> {
        JsonPlaceholderClient::with_base_url("http://localhost:9", RecordingClient::answering(status, "{}"))
    }

    #[tokio::test]
    async fn endpoints_map_to_resource_paths() {
        let client = client(200);

        client.get_user(7).await.unwrap();
        assert_eq!(client.api().http().last().url, "http://localhost:9/users/7");

        client.update_user(7, &json!({"name": "x"})).await.unwrap();
        let sent = client.api().http().last();
        assert_eq!(sent.method, HttpMethod::Put);
        assert_eq!(sent.url, "http://localhost:9/users/7");

        client.get_user_posts(2).await.unwrap();
        assert_eq!(client.api().http().last().query, vec![("userId".to_string(), "2".to_string())]);
    }

    #[test]
    fn defaults_to_public_service() {
        let client = JsonPlaceholderClient::new(RecordingClient::default());
        assert_eq!(client.api().base_url(), JSONPLACEHOLDER_URL);
    }
}
