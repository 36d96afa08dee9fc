//! CLI command implementations

mod ai;
mod auth;
mod books;
mod library;

pub use ai::{health, recommend, search};
pub use auth::{login, logout, register, whoami};
pub use books::books;
pub use library::{borrow, dashboard, return_book, reviews, similar};

use anyhow::{Context, Result};
use biblio_core::{
    ApiClient, ClientConfig, CredentialStore, FileCredentialStore, MemoryCredentialStore,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Build the API client from the environment plus command-line overrides
///
/// With `allow_memory_credentials`, a missing config directory degrades to a
/// process-local credential store instead of failing; the catalog uses this
/// so that browsing never fails.
pub fn build_client(
    api_url: Option<&str>,
    timeout_secs: Option<u64>,
    allow_memory_credentials: bool,
) -> Result<ApiClient> {
    let mut config = ClientConfig::from_env().context("Invalid BIBLIO_* environment")?;

    if let Some(url) = api_url {
        config = config.with_base_url(url);
    }
    if let Some(secs) = timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs))?;
    }

    let default_path = FileCredentialStore::default_path().ok();
    let credentials = credential_store(
        config.credentials_path.clone(),
        default_path,
        allow_memory_credentials,
    )?;
    tracing::debug!("Using backend {}", config.base_url);

    Ok(ApiClient::new(config, credentials)?)
}

/// Pick the credential store: explicit path, then the platform default
fn credential_store(
    configured: Option<PathBuf>,
    default_path: Option<PathBuf>,
    allow_memory: bool,
) -> Result<Arc<dyn CredentialStore>> {
    match configured.or(default_path) {
        Some(path) => {
            tracing::debug!("Credentials file: {:?}", path);
            Ok(Arc::new(FileCredentialStore::new(path)))
        }
        None if allow_memory => {
            tracing::warn!("No config directory found, credentials will not be remembered");
            Ok(Arc::new(MemoryCredentialStore::new()))
        }
        None => anyhow::bail!(
            "Could not determine where to store credentials (set BIBLIO_CREDENTIALS_PATH)"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_configured_path_wins() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let configured = temp_dir.path().join("configured.json");
        let default_path = temp_dir.path().join("default.json");

        let store = credential_store(Some(configured.clone()), Some(default_path.clone()), false)
            .unwrap();
        store.set("tok").await.unwrap();

        assert!(configured.exists());
        assert!(!default_path.exists());
    }

    #[tokio::test]
    async fn test_missing_location_degrades_to_memory_when_allowed() {
        let store = credential_store(None, None, true).unwrap();
        assert_eq!(store.get().await.unwrap(), None);
        store.set("tok").await.unwrap();
        assert_eq!(store.get().await.unwrap().as_deref(), Some("tok"));
    }

    #[test]
    fn test_missing_location_fails_otherwise() {
        let err = credential_store(None, None, false).err().unwrap();
        assert!(err.to_string().contains("BIBLIO_CREDENTIALS_PATH"));
    }
}
