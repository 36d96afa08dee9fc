//! Page-view model for the catalog screen
//!
//! Owns the loaded catalog for the lifetime of one view. The load runs on a
//! background task scoped to a cancellation token; once the page is
//! unmounted the task can no longer write to the page state.

use super::filter::SearchState;
use super::loader::{CatalogLoader, CatalogSource, LoadOutcome};
use crate::types::BookRecord;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Load state of a page: `Idle → Loading → Loaded`
#[derive(Debug, Clone, PartialEq)]
pub enum LoadPhase {
    Idle,
    Loading,

    /// Terminal for the page's lifetime
    Loaded(LoadOutcome),
}

impl LoadPhase {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadPhase::Loading)
    }

    pub fn outcome(&self) -> Option<&LoadOutcome> {
        match self {
            LoadPhase::Loaded(outcome) => Some(outcome),
            _ => None,
        }
    }
}

/// One activation of the catalog page
pub struct CatalogPage {
    source: Arc<dyn CatalogSource>,
    loader: CatalogLoader,
    phase: Arc<RwLock<LoadPhase>>,
    search: SearchState,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl CatalogPage {
    pub fn new(source: Arc<dyn CatalogSource>, loader: CatalogLoader) -> Self {
        Self {
            source,
            loader,
            phase: Arc::new(RwLock::new(LoadPhase::Idle)),
            search: SearchState::default(),
            cancel: CancellationToken::new(),
            task: None,
        }
    }

    /// Start the single load of this page
    ///
    /// Returns `false` when a load was already started or the page has been
    /// unmounted; a fresh page is needed to load again.
    pub async fn mount(&mut self) -> bool {
        let mut phase = self.phase.write().await;
        if *phase != LoadPhase::Idle || self.cancel.is_cancelled() {
            return false;
        }
        *phase = LoadPhase::Loading;
        drop(phase);

        let source = Arc::clone(&self.source);
        let loader = self.loader.clone();
        let state = Arc::clone(&self.phase);
        let cancel = self.cancel.clone();

        self.task = Some(tokio::spawn(async move {
            let Some(outcome) = loader.load(source.as_ref(), &cancel).await else {
                return;
            };

            // Checked under the lock that `unmount` takes before cancelling
            let mut phase = state.write().await;
            if cancel.is_cancelled() {
                tracing::debug!("Page unmounted before the catalog arrived");
                return;
            }
            *phase = LoadPhase::Loaded(outcome);
        }));

        true
    }

    /// Tear the page down; no state is written after this returns
    pub async fn unmount(&mut self) {
        {
            let _phase = self.phase.write().await;
            self.cancel.cancel();
        }

        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::warn!("Catalog load task failed: {}", e);
            }
        }
    }

    pub fn is_mounted(&self) -> bool {
        !self.cancel.is_cancelled()
    }

    /// Wait for the running load, then report the outcome
    pub async fn wait_loaded(&mut self) -> Option<LoadOutcome> {
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::warn!("Catalog load task failed: {}", e);
            }
        }
        self.phase.read().await.outcome().cloned()
    }

    pub async fn phase(&self) -> LoadPhase {
        self.phase.read().await.clone()
    }

    /// Notice for the user, if the load fell back because of a failure
    pub async fn notice(&self) -> Option<String> {
        self.phase
            .read()
            .await
            .outcome()
            .and_then(|outcome| outcome.notice.clone())
    }

    /// Update the search term
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search.set(term);
    }

    pub fn search(&self) -> &SearchState {
        &self.search
    }

    /// The catalog filtered by the current search term
    ///
    /// Empty until the load has completed.
    pub async fn visible(&self) -> Vec<BookRecord> {
        let phase = self.phase.read().await;
        let visible = match phase.outcome() {
            Some(outcome) => self
                .search
                .apply(&outcome.result.books)
                .into_iter()
                .cloned()
                .collect(),
            None => Vec::new(),
        };
        visible
    }
}

impl Drop for CatalogPage {
    fn drop(&mut self) {
        // Stops the in-flight request; the state dies with the page
        self.cancel.cancel();
    }
}
