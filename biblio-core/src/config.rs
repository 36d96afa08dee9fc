//! Client configuration
//!
//! Values come from `BIBLIO_*` environment variables and can be overridden
//! by the caller afterwards.

use crate::error::{BiblioError, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Backend base URL used when `BIBLIO_API_URL` is unset
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Per-request timeout used when `BIBLIO_TIMEOUT_SECS` is unset
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for [`crate::client::ApiClient`]
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Backend base URL, without trailing slash
    pub base_url: String,

    /// Timeout applied to every request
    pub timeout: Duration,

    /// Where the bearer credential is persisted (None = platform default)
    pub credentials_path: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            credentials_path: None,
        }
    }
}

impl ClientConfig {
    /// Create a config pointing at the given backend
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::default().with_base_url(base_url)
    }

    /// Read `BIBLIO_API_URL`, `BIBLIO_TIMEOUT_SECS` and `BIBLIO_CREDENTIALS_PATH`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(url) = lookup("BIBLIO_API_URL").filter(|s| !s.trim().is_empty()) {
            config = config.with_base_url(url);
        }

        if let Some(secs) = lookup("BIBLIO_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                BiblioError::Config(format!("BIBLIO_TIMEOUT_SECS: '{}' is not a number", secs))
            })?;
            config = config.with_timeout(Duration::from_secs(secs))?;
        }

        if let Some(path) = lookup("BIBLIO_CREDENTIALS_PATH").filter(|s| !s.is_empty()) {
            config.credentials_path = Some(PathBuf::from(path));
        }

        Ok(config)
    }

    /// Set the backend URL, trimming trailing slashes
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim().trim_end_matches('/').to_string();
        self
    }

    /// Set the request timeout (must be non-zero)
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        if timeout.is_zero() {
            return Err(BiblioError::Config("timeout must be at least 1 second".into()));
        }
        self.timeout = timeout;
        Ok(self)
    }

    /// Set where the credential is persisted
    pub fn with_credentials_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.credentials_path = Some(path.into());
        self
    }

    /// Join an endpoint path onto the base URL
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.url("/books"), "http://localhost:8000/books");
    }

    #[test]
    fn test_env_overrides() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("BIBLIO_API_URL", "https://library.example.com/api/"),
            ("BIBLIO_TIMEOUT_SECS", "3"),
            ("BIBLIO_CREDENTIALS_PATH", "/tmp/creds.json"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "https://library.example.com/api");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.credentials_path, Some(PathBuf::from("/tmp/creds.json")));
        assert_eq!(
            config.url("ai/recommend/4"),
            "https://library.example.com/api/ai/recommend/4"
        );
    }

    #[test]
    fn test_invalid_timeout() {
        let err = ClientConfig::from_lookup(lookup(&[("BIBLIO_TIMEOUT_SECS", "soon")]));
        assert!(matches!(err, Err(BiblioError::Config(_))));

        let err = ClientConfig::from_lookup(lookup(&[("BIBLIO_TIMEOUT_SECS", "0")]));
        assert!(matches!(err, Err(BiblioError::Config(_))));
    }
}
