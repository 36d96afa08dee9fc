//! Client-side search over an already loaded catalog

use crate::types::BookRecord;

/// The live search term of a page view
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    term: String,
    needle: String,
}

impl SearchState {
    pub fn new(term: impl Into<String>) -> Self {
        let mut state = Self::default();
        state.set(term);
        state
    }

    /// Replace the term (every keystroke)
    pub fn set(&mut self, term: impl Into<String>) {
        self.term = term.into();
        self.needle = self.term.to_lowercase();
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn is_empty(&self) -> bool {
        self.term.is_empty()
    }

    /// Case-insensitive substring match on title, author or genre
    ///
    /// Absent fields never match. The empty term matches everything.
    pub fn matches(&self, book: &BookRecord) -> bool {
        if self.needle.is_empty() {
            return true;
        }

        [&book.title, &book.author, &book.genre]
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&self.needle))
    }

    /// Matching records of `catalog`, in catalog order
    pub fn apply<'a>(&self, catalog: &'a [BookRecord]) -> Vec<&'a BookRecord> {
        catalog.iter().filter(|book| self.matches(book)).collect()
    }
}

/// Filter `catalog` by `term` without touching the source
pub fn filter_books<'a>(catalog: &'a [BookRecord], term: &str) -> Vec<&'a BookRecord> {
    SearchState::new(term).apply(catalog)
}
