//! The BookRecord type - one entry of the catalog

use super::lenient;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Title shown when a record has none
pub const UNTITLED: &str = "Untitled";

/// Author shown when a record has none
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// Rating shown when a record has none
pub const DEFAULT_RATING: f64 = 4.0;

/// Book identifier as sent by the backend
///
/// Demo records use small integers; the database hands out UUID strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BookId {
    Number(u64),
    Text(String),
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookId::Number(n) => write!(f, "{}", n),
            BookId::Text(s) => f.write_str(s),
        }
    }
}

impl FromStr for BookId {
    type Err = std::convert::Infallible;

    /// All-digit input is numeric, anything else is kept as text
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(match s.parse::<u64>() {
            Ok(n) => BookId::Number(n),
            Err(_) => BookId::Text(s.to_string()),
        })
    }
}

impl From<u64> for BookId {
    fn from(id: u64) -> Self {
        BookId::Number(id)
    }
}

impl From<&str> for BookId {
    fn from(id: &str) -> Self {
        BookId::Text(id.to_string())
    }
}

impl From<String> for BookId {
    fn from(id: String) -> Self {
        BookId::Text(id)
    }
}

/// A single book as returned by the backend catalog endpoint
///
/// Every field is optional on the wire and decoded leniently: a field of the
/// wrong type is dropped instead of rejecting the record. The `display_*`
/// helpers apply the placeholders used when rendering.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BookRecord {
    /// Identifier, unique within one load of the catalog
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub id: Option<BookId>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Cover image URL
    #[serde(
        default,
        alias = "cover_image_url",
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub cover_url: Option<String>,

    /// Average rating, 0-5
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,

    #[serde(
        default,
        alias = "publication_year",
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub published_year: Option<i32>,

    /// Page count
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub pages: Option<u32>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,

    /// View/read count
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub views: Option<u64>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub available_copies: Option<u32>,
}

impl BookRecord {
    /// Create a record with a numeric id, a title and an author
    pub fn new(id: u64, title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id: Some(BookId::Number(id)),
            title: Some(title.into()),
            author: Some(author.into()),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<BookId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set genre
    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    /// Set description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set rating
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(UNTITLED)
    }

    pub fn display_author(&self) -> &str {
        self.author.as_deref().unwrap_or(UNKNOWN_AUTHOR)
    }

    /// Rating for display, defaulting to 4.0 and clamped to 0-5
    pub fn display_rating(&self) -> f64 {
        self.rating.unwrap_or(DEFAULT_RATING).clamp(0.0, 5.0)
    }

    pub fn display_views(&self) -> u64 {
        self.views.unwrap_or(0)
    }

    pub fn display_available(&self) -> u32 {
        self.available_copies.unwrap_or(0)
    }

    /// Placeholder glyph shown instead of the cover image
    ///
    /// First alphanumeric character of the title, upper-cased, or `?`.
    pub fn cover_glyph(&self) -> char {
        self.title
            .as_deref()
            .and_then(|t| t.chars().find(|c| c.is_alphanumeric()))
            .and_then(|c| c.to_uppercase().next())
            .unwrap_or('?')
    }
}
