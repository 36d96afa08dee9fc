//! Interpretation of the catalog response body
//!
//! The backend answers `GET /books` either with a bare array or with an
//! object carrying a `books` array. A bare non-empty array wins over the
//! nested form; an empty array of either kind is not usable.

use crate::types::BookRecord;
use serde::Deserialize;
use serde_json::Value;

/// Recognised shape of a catalog body
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogShape {
    /// Non-empty bare array
    Flat(Vec<BookRecord>),

    /// Object with a non-empty `books` array
    Nested(Vec<BookRecord>),

    /// Empty array, `null`, `{}`, empty `books`, or anything else
    Unrecognized,
}

/// Classify a catalog body
///
/// Every entry of a non-empty array is kept, in order. Entries are decoded
/// field by field; one that is not an object at all becomes a record with
/// no fields, rendered with the usual placeholders.
pub fn parse_catalog_body(body: &Value) -> CatalogShape {
    if let Value::Array(items) = body {
        if !items.is_empty() {
            return CatalogShape::Flat(decode_records(items));
        }
    } else if let Some(Value::Array(items)) = body.get("books") {
        if !items.is_empty() {
            return CatalogShape::Nested(decode_records(items));
        }
    }

    CatalogShape::Unrecognized
}

fn decode_records(items: &[Value]) -> Vec<BookRecord> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            BookRecord::deserialize(item).unwrap_or_else(|e| {
                tracing::debug!("Catalog entry {} is not a book object: {}", index, e);
                BookRecord::default()
            })
        })
        .collect()
}
