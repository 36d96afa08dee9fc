//! Catalog loading, fallback and client-side search

mod fallback;
mod filter;
mod loader;
mod page;
mod shape;

pub use fallback::fallback_books;
pub use filter::{filter_books, SearchState};
pub use loader::{
    resolve, CatalogLoadResult, CatalogLoader, CatalogSource, CatalogSourceKind, LoadOutcome,
    FALLBACK_NOTICE,
};
pub use page::{CatalogPage, LoadPhase};
pub use shape::{parse_catalog_body, CatalogShape};
