//! Thin wrappers over the upstream services.

mod base;
mod httpbin;
mod jsonplaceholder;

pub use base::ApiClient;
pub use httpbin::{HTTPBIN_URL, HttpBinClient};
pub use jsonplaceholder::{JSONPLACEHOLDER_URL, JsonPlaceholderClient};
