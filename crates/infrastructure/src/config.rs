//! Harness configuration from the environment.

use std::path::PathBuf;

use apiprobe_application::clients::JSONPLACEHOLDER_URL;
use apiprobe_domain::request::DEFAULT_TIMEOUT_MS;
use thiserror::Error;
use url::Url;

use crate::report::DEFAULT_RESULTS_DIR;
use crate::schema::DEFAULT_SCHEMAS_DIR;

/// Base URL of the API under test.
pub const ENV_BASE_URL: &str = "APIPROBE_BASE_URL";
/// Directory holding `<name>.json` schemas.
pub const ENV_SCHEMAS_DIR: &str = "APIPROBE_SCHEMAS_DIR";
/// Directory result files are written to.
pub const ENV_RESULTS_DIR: &str = "APIPROBE_RESULTS_DIR";
/// Per-request timeout in milliseconds.
pub const ENV_TIMEOUT_MS: &str = "APIPROBE_TIMEOUT_MS";

/// Invalid configuration value.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid value {value:?} for {key}: {message}")]
pub struct ConfigError {
    /// Variable name.
    pub key: &'static str,
    /// Rejected value.
    pub value: String,
    /// Why it was rejected.
    pub message: String,
}

/// Where the harness sends requests and keeps its files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    /// API under test.
    pub base_url: String,
    /// Schema directory.
    pub schemas_dir: PathBuf,
    /// Results directory.
    pub results_dir: PathBuf,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            base_url: JSONPLACEHOLDER_URL.to_string(),
            schemas_dir: PathBuf::from(DEFAULT_SCHEMAS_DIR),
            results_dir: PathBuf::from(DEFAULT_RESULTS_DIR),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl HarnessConfig {
    /// Reads the `APIPROBE_*` variables over the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    /// Empty values count as unset.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an unusable value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(url) = get(ENV_BASE_URL) {
            config.base_url = checked_url(ENV_BASE_URL, url)?;
        }
        if let Some(dir) = get(ENV_SCHEMAS_DIR) {
            config.schemas_dir = PathBuf::from(dir);
        }
        if let Some(dir) = get(ENV_RESULTS_DIR) {
            config.results_dir = PathBuf::from(dir);
        }
        if let Some(raw) = get(ENV_TIMEOUT_MS) {
            let parsed = raw.trim().parse::<u64>();
            config.timeout_ms = match parsed {
                Ok(ms) if ms > 0 => ms,
                Ok(_) => return Err(invalid(ENV_TIMEOUT_MS, raw, "must be positive")),
                Err(e) => return Err(invalid(ENV_TIMEOUT_MS, raw, &e.to_string())),
            };
        }

        Ok(config)
    }
}

/// Accepts absolute `http`/`https` URLs that name a host.
///
/// # Errors
///
/// Returns an error naming `key` for anything else.
pub fn checked_url(key: &'static str, value: String) -> Result<String, ConfigError> {
    let parsed = Url::parse(&value).map(|url| {
        matches!(url.scheme(), "http" | "https") && url.host_str().is_some_and(|h| !h.is_empty())
    });
    match parsed {
        Ok(true) => Ok(value),
        Ok(false) => Err(invalid(key, value, "expected an http:// or https:// URL with a host")),
        Err(e) => Err(invalid(key, value, &e.to_string())),
    }
}

fn invalid(key: &'static str, value: String, message: &str) -> ConfigError {
    ConfigError {
        key,
        value,
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_point_at_public_services() {
        let config = HarnessConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, HarnessConfig::default());
        assert_eq!(config.base_url, "https://jsonplaceholder.typicode.com");
        assert_eq!(config.schemas_dir, PathBuf::from("schemas"));
        assert_eq!(config.results_dir, PathBuf::from("reports/allure-results"));
    }

    #[test]
    fn variables_override_defaults() {
        let config = HarnessConfig::from_lookup(lookup(&[
            (ENV_BASE_URL, "http://localhost:3000"),
            (ENV_SCHEMAS_DIR, "/srv/schemas"),
            (ENV_TIMEOUT_MS, "2500"),
            (ENV_RESULTS_DIR, ""),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.schemas_dir, PathBuf::from("/srv/schemas"));
        assert_eq!(config.timeout_ms, 2500);
        assert_eq!(config.results_dir, PathBuf::from("reports/allure-results"));
    }

    #[test]
    fn bad_values_are_rejected() {
        let err = HarnessConfig::from_lookup(lookup(&[(ENV_TIMEOUT_MS, "soon")])).unwrap_err();
        assert_eq!(err.key, ENV_TIMEOUT_MS);

        let err = HarnessConfig::from_lookup(lookup(&[(ENV_TIMEOUT_MS, "0")])).unwrap_err();
        assert_eq!(err.message, "must be positive");

        let err = HarnessConfig::from_lookup(lookup(&[(ENV_BASE_URL, "localhost:3000")])).unwrap_err();
        assert_eq!(err.key, ENV_BASE_URL);
    }

    #[test]
    fn urls_need_a_scheme_and_host() {
        assert!(checked_url(ENV_BASE_URL, "http://".to_string()).is_err());
        assert!(checked_url(ENV_BASE_URL, "https://".to_string()).is_err());
        assert!(checked_url(ENV_BASE_URL, "ftp://example.com".to_string()).is_err());
        assert!(checked_url(ENV_BASE_URL, "http://localhost:3000".to_string()).is_ok());
        assert_eq!(
            checked_url(ENV_BASE_URL, "https://api.example.com/v1/".to_string()).unwrap(),
            "https://api.example.com/v1/"
        );
    }
}
