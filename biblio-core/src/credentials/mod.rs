//! Bearer credential storage
//!
//! The access token is the only state shared between requests. It is held by
//! a [`CredentialStore`] handed to the client at construction time, so nothing
//! looks it up ambiently.

use crate::error::CredentialError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Result type for credential operations
pub type CredentialResult<T> = std::result::Result<T, CredentialError>;

/// File name of the persisted credential inside the config directory
pub const CREDENTIALS_FILE: &str = "credentials.json";

/// Abstract credential provider
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Current token, if any
    async fn get(&self) -> CredentialResult<Option<String>>;

    /// Replace the stored token
    async fn set(&self, token: &str) -> CredentialResult<()>;

    /// Forget the stored token (no-op when none is stored)
    async fn clear(&self) -> CredentialResult<()>;
}

/// On-disk representation, keyed `token`
#[derive(Debug, Serialize, Deserialize)]
struct StoredCredential {
    token: String,
    saved_at: DateTime<Utc>,
}

/// Credential persisted as a small JSON document
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Create a store backed by the given file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location: `<platform config dir>/biblio/credentials.json`
    pub fn default_path() -> CredentialResult<PathBuf> {
        directories::ProjectDirs::from("", "", "biblio")
            .map(|dirs| dirs.config_dir().join(CREDENTIALS_FILE))
            .ok_or(CredentialError::NoLocation)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn get(&self) -> CredentialResult<Option<String>> {
        // A missing file just means nobody is logged in
        let data = match tokio::fs::read_to_string(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let stored: StoredCredential =
            serde_json::from_str(&data).map_err(|e| CredentialError::Malformed(e.to_string()))?;

        if stored.token.is_empty() {
            Ok(None)
        } else {
            Ok(Some(stored.token))
        }
    }

    async fn set(&self, token: &str) -> CredentialResult<()> {
        let stored = StoredCredential {
            token: token.to_string(),
            saved_at: Utc::now(),
        };
        let data = serde_json::to_string_pretty(&stored)
            .map_err(|e| CredentialError::Malformed(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        // Write to a sibling temp file then rename to avoid partial writes
        let temp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, &data).await?;
        tokio::fs::rename(&temp_path, &self.path).await?;

        tracing::debug!("Stored credential at {:?}", self.path);
        Ok(())
    }

    async fn clear(&self) -> CredentialResult<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory credential store (for testing and embedding)
#[derive(Default)]
pub struct MemoryCredentialStore {
    token: std::sync::RwLock<Option<String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with a token
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: std::sync::RwLock::new(Some(token.into())),
        }
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn get(&self) -> CredentialResult<Option<String>> {
        Ok(self
            .token
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone())
    }

    async fn set(&self, token: &str) -> CredentialResult<()> {
        *self
            .token
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(token.to_string());
        Ok(())
    }

    async fn clear(&self) -> CredentialResult<()> {
        *self
            .token
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_memory_store() {
        let store = MemoryCredentialStore::new();
        assert_eq!(store.get().await.unwrap(), None);

        store.set("abc").await.unwrap();
        assert_eq!(store.get().await.unwrap().as_deref(), Some("abc"));

        store.clear().await.unwrap();
        assert_eq!(store.get().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_file_store_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileCredentialStore::new(temp_dir.path().join("nested/credentials.json"));

        // Missing file
        assert_eq!(store.get().await.unwrap(), None);

        store.set("secret-token").await.unwrap();
        assert_eq!(store.get().await.unwrap().as_deref(), Some("secret-token"));

        // Persisted under the `token` key
        let raw = std::fs::read_to_string(store.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["token"], "secret-token");

        store.clear().await.unwrap();
        assert_eq!(store.get().await.unwrap(), None);

        // Clearing twice is fine
        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn test_file_store_malformed() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("credentials.json");
        std::fs::write(&path, "not json").unwrap();

        let store = FileCredentialStore::new(&path);
        assert!(matches!(
            store.get().await,
            Err(CredentialError::Malformed(_))
        ));
    }
}
