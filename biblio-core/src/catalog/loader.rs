//! Catalog acquisition with fallback to the built-in dataset
//!
//! A load is a single attempt. Failures never escape: every outcome is a
//! populated catalog plus an optional notice for the user.

use super::fallback::fallback_books;
use super::shape::{parse_catalog_body, CatalogShape};
use crate::client::ResponseEnvelope;
use crate::error::{BiblioError, Result};
use crate::types::BookRecord;
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Notice shown when the backend could not be reached
pub const FALLBACK_NOTICE: &str = "Using demo data. Backend connection failed.";

/// Anything that can produce the raw catalog response
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_catalog(&self) -> Result<ResponseEnvelope>;
}

/// Where the displayed records came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CatalogSourceKind {
    RemoteFlat,
    RemoteNested,
    Fallback,
}

impl std::fmt::Display for CatalogSourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            CatalogSourceKind::RemoteFlat => "remote-flat",
            CatalogSourceKind::RemoteNested => "remote-nested",
            CatalogSourceKind::Fallback => "fallback",
        })
    }
}

/// A populated catalog and its origin
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogLoadResult {
    pub books: Vec<BookRecord>,
    pub source: CatalogSourceKind,
}

impl CatalogLoadResult {
    pub fn fallback() -> Self {
        Self {
            books: fallback_books(),
            source: CatalogSourceKind::Fallback,
        }
    }
}

/// Final result of one load, as seen by presentation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadOutcome {
    pub result: CatalogLoadResult,

    /// User-visible notice; set only when the backend failed
    pub notice: Option<String>,
}

/// Apply the fallback rules to the outcome of a catalog request
///
/// 1. Request failed → fallback dataset with [`FALLBACK_NOTICE`].
/// 2. Body is a non-empty array → `RemoteFlat`.
/// 3. Body has a non-empty `books` array → `RemoteNested`.
/// 4. Otherwise → fallback dataset, silently.
pub fn resolve(response: Result<ResponseEnvelope>) -> LoadOutcome {
    let shape = response.map(|envelope| parse_catalog_body(&envelope.body));

    match shape {
        Ok(CatalogShape::Flat(books)) => remote(books, CatalogSourceKind::RemoteFlat),
        Ok(CatalogShape::Nested(books)) => remote(books, CatalogSourceKind::RemoteNested),
        Ok(CatalogShape::Unrecognized) => {
            tracing::warn!("Backend returned no usable books, showing demo data");
            LoadOutcome {
                result: CatalogLoadResult::fallback(),
                notice: None,
            }
        }
        Err(e) => {
            tracing::warn!("Catalog request failed, showing demo data: {}", e);
            LoadOutcome {
                result: CatalogLoadResult::fallback(),
                notice: Some(FALLBACK_NOTICE.to_string()),
            }
        }
    }
}

fn remote(books: Vec<BookRecord>, source: CatalogSourceKind) -> LoadOutcome {
    tracing::info!("Loaded {} books ({})", books.len(), source);
    LoadOutcome {
        result: CatalogLoadResult { books, source },
        notice: None,
    }
}

/// Runs a single catalog load with a deadline and a cancellation scope
#[derive(Debug, Clone)]
pub struct CatalogLoader {
    timeout: Duration,
}

impl CatalogLoader {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetch and resolve the catalog
    ///
    /// Exceeding the deadline counts as a network failure. Returns `None`
    /// if `cancel` fires first; the in-flight request is dropped.
    pub async fn load(
        &self,
        source: &dyn CatalogSource,
        cancel: &CancellationToken,
    ) -> Option<LoadOutcome> {
        let fetch = async {
            match tokio::time::timeout(self.timeout, source.fetch_catalog()).await {
                Ok(response) => response,
                Err(_) => Err(BiblioError::Network(format!(
                    "catalog request timed out after {:?}",
                    self.timeout
                ))),
            }
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!("Catalog load cancelled");
                None
            }
            response = fetch => Some(resolve(response)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ok(body: serde_json::Value) -> Result<ResponseEnvelope> {
        Ok(ResponseEnvelope { status: 200, body })
    }

    #[test]
    fn test_flat_response_is_used_verbatim() {
        let outcome = resolve(ok(json!([
            {"id": 1, "title": "Dune", "author": "Herbert", "genre": "Sci-Fi"}
        ])));
        assert_eq!(outcome.result.source, CatalogSourceKind::RemoteFlat);
        assert_eq!(
            outcome.result.books,
            vec![BookRecord::new(1, "Dune", "Herbert").with_genre("Sci-Fi")]
        );
        assert_eq!(outcome.notice, None);
    }

    #[test]
    fn test_nested_response() {
        let outcome = resolve(ok(json!({"books": [{"id": 4, "title": "Emma"}]})));
        assert_eq!(outcome.result.source, CatalogSourceKind::RemoteNested);
        assert_eq!(outcome.result.books.len(), 1);
        assert_eq!(outcome.notice, None);
    }

    #[test]
    fn test_empty_responses_fall_back_silently() {
        for body in [json!([]), json!({}), json!({"books": []}), json!(null)] {
            let outcome = resolve(ok(body));
            assert_eq!(outcome.result, CatalogLoadResult::fallback());
            assert_eq!(outcome.notice, None);
        }
    }

    #[test]
    fn test_failures_fall_back_with_notice() {
        let failures = [
            BiblioError::Network("connection refused".into()),
            BiblioError::Http {
                status: 503,
                body: String::new(),
            },
            BiblioError::Decode("expected value".into()),
        ];
        for err in failures {
            let outcome = resolve(Err(err));
            assert_eq!(outcome.result.source, CatalogSourceKind::Fallback);
            assert_eq!(outcome.result.books.len(), 6);
            assert_eq!(outcome.notice.as_deref(), Some(FALLBACK_NOTICE));
        }
    }

    #[test]
    fn test_odd_entries_stay_remote() {
        let outcome = resolve(ok(json!([
            {"id": "3f2a9c1e-8b1d-4c2e-9f00-1a2b3c4d5e6f", "title": "Dune"}
        ])));
        assert_eq!(outcome.result.source, CatalogSourceKind::RemoteFlat);
        assert_eq!(
            outcome.result.books,
            vec![BookRecord {
                title: Some("Dune".into()),
                ..BookRecord::default()
            }
            .with_id("3f2a9c1e-8b1d-4c2e-9f00-1a2b3c4d5e6f")]
        );
        assert_eq!(outcome.notice, None);

        let outcome = resolve(ok(json!([
            {"id": 1, "title": "Dune"},
            {"id": 2, "rating": "4.5"},
            {"name": "not a book"}
        ])));
        assert_eq!(outcome.result.source, CatalogSourceKind::RemoteFlat);
        assert_eq!(outcome.result.books.len(), 3);
        assert_eq!(outcome.result.books[1].rating, Some(4.5));
        assert_eq!(outcome.notice, None);
    }

    #[test]
    fn test_source_kind_labels() {
        assert_eq!(CatalogSourceKind::RemoteFlat.to_string(), "remote-flat");
        assert_eq!(
            serde_json::to_value(CatalogSourceKind::RemoteNested).unwrap(),
            json!("remote-nested")
        );
    }

    struct Stalled;

    #[async_trait]
    impl CatalogSource for Stalled {
        async fn fetch_catalog(&self) -> Result<ResponseEnvelope> {
            std::future::pending::<Result<ResponseEnvelope>>().await
        }
    }

    #[tokio::test]
    async fn test_timeout_counts_as_network_failure() {
        let loader = CatalogLoader::new(Duration::from_millis(20));
        let outcome = loader
            .load(&Stalled, &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(outcome.result.source, CatalogSourceKind::Fallback);
        assert_eq!(outcome.notice.as_deref(), Some(FALLBACK_NOTICE));
    }

    #[tokio::test]
    async fn test_cancelled_load_yields_nothing() {
        let loader = CatalogLoader::new(Duration::from_secs(30));
        let cancel = CancellationToken::new();
        cancel.cancel();
        assert!(loader.load(&Stalled, &cancel).await.is_none());
    }
}
