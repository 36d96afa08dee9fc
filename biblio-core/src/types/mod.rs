//! Data types exchanged with the Biblio backend

mod ai;
mod auth;
mod book;
mod library;

pub use ai::{HealthStatus, Recommendation, SearchHit};
pub use auth::{LoginRequest, RegisterRequest, TokenResponse, UserProfile};
pub use book::{BookId, BookRecord, DEFAULT_RATING, UNKNOWN_AUTHOR, UNTITLED};
pub use library::{BorrowRequest, BorrowStatus, Borrowing, ReadingStats, ReturnReceipt, Review};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Decode an optional field, dropping values of the wrong type
///
/// Numbers sent as strings (`"4.5"`) and strings sent as numbers
/// (`9780451524935`) are coerced; anything else becomes `None`.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if let Ok(parsed) = T::deserialize(&value) {
        return Ok(Some(parsed));
    }

    let coerced = match &value {
        Value::String(s) => serde_json::from_str::<T>(s.trim()).ok(),
        Value::Number(n) => T::deserialize(Value::String(n.to_string())).ok(),
        _ => None,
    };
    Ok(coerced)
}
