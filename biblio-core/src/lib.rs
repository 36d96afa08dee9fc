//! Biblio Core Library
//!
//! Client-side core of the Biblio library application: a typed HTTP client
//! for the backend, the bearer credential provider it reads from, and the
//! catalog loader that falls back to a built-in dataset when the backend has
//! nothing usable, plus the search filter applied on top of it.

pub mod catalog;
pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod types;

pub use catalog::{
    filter_books, CatalogLoadResult, CatalogLoader, CatalogPage, CatalogSource,
    CatalogSourceKind, LoadOutcome, LoadPhase, SearchState, FALLBACK_NOTICE,
};
pub use client::{ApiClient, AuthSession, Dashboard, ResponseEnvelope};
pub use config::ClientConfig;
pub use credentials::{CredentialStore, FileCredentialStore, MemoryCredentialStore};
pub use error::{BiblioError, CredentialError, Result};
pub use types::{BookId, BookRecord};
