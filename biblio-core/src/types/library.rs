//! Lending and reading-activity payloads behind the dashboard

use super::{lenient, BookId, BookRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// State of a lending record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorrowStatus {
    Available,
    Borrowed,
    Reserved,
    Overdue,
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for BorrowStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            BorrowStatus::Available => "available",
            BorrowStatus::Borrowed => "borrowed",
            BorrowStatus::Reserved => "reserved",
            BorrowStatus::Overdue => "overdue",
            BorrowStatus::Unknown => "unknown",
        })
    }
}

/// One entry of `GET /my-borrowings`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Borrowing {
    pub id: BookId,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub book_id: Option<BookId>,

    /// Embedded book, when the backend expands it
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub book: Option<BookRecord>,

    #[serde(
        default,
        alias = "borrow_date",
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub borrowed_date: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,

    #[serde(
        default,
        alias = "return_date",
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub returned_date: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub status: Option<BorrowStatus>,

    #[serde(default)]
    pub fine_amount: f64,
}

impl Borrowing {
    /// Title of the borrowed book, or its id when the book is not embedded
    pub fn label(&self) -> String {
        match (&self.book, &self.book_id) {
            (Some(book), _) => book.display_title().to_string(),
            (None, Some(id)) => format!("Book {}", id),
            (None, None) => format!("Borrowing {}", self.id),
        }
    }

    pub fn is_returned(&self) -> bool {
        self.returned_date.is_some()
    }

    /// Still out and past its due date at `now`
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        if self.is_returned() {
            return false;
        }
        self.status == Some(BorrowStatus::Overdue) || self.due_date.is_some_and(|due| due < now)
    }
}

/// Body of `POST /borrow`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BorrowRequest {
    pub book_id: BookId,
}

/// Response of `POST /return/{borrowing_id}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReturnReceipt {
    #[serde(default)]
    pub message: String,

    #[serde(default)]
    pub fine: f64,
}

/// Response of `GET /reading/stats`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReadingStats {
    pub total_books_read: u32,
    pub total_pages_read: u64,

    /// Minutes
    pub total_reading_time: u64,

    pub current_streak: u32,
    pub longest_streak: u32,

    /// The backend sends the string "None" when there is no history
    pub favorite_genre: Option<String>,

    /// Minutes read per `YYYY-MM`
    pub monthly_reading: BTreeMap<String, u64>,
}

impl ReadingStats {
    pub fn favorite_genre(&self) -> Option<&str> {
        self.favorite_genre
            .as_deref()
            .filter(|genre| !genre.is_empty() && *genre != "None")
    }

    /// Reading time formatted as `"<h>h <m>m"`
    pub fn reading_time_label(&self) -> String {
        format!(
            "{}h {}m",
            self.total_reading_time / 60,
            self.total_reading_time % 60
        )
    }
}

/// One entry of `GET /books/{id}/reviews`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub id: Option<BookId>,

    /// 1-5
    pub rating: u8,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    #[serde(default)]
    pub helpful_count: u32,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_borrowing_parsing() {
        let json = r#"{
            "id": "b-1",
            "book_id": "3f2a9c1e",
            "borrowed_date": "2024-05-01T10:00:00+00:00",
            "due_date": "2024-05-15T10:00:00Z",
            "status": "borrowed",
            "fine_amount": 0.0
        }"#;
        let borrowing: Borrowing = serde_json::from_str(json).unwrap();
        assert_eq!(borrowing.status, Some(BorrowStatus::Borrowed));
        assert_eq!(borrowing.label(), "Book 3f2a9c1e");
        assert!(!borrowing.is_returned());

        let before = Utc.with_ymd_and_hms(2024, 5, 10, 0, 0, 0).unwrap();
        let after = Utc.with_ymd_and_hms(2024, 5, 20, 0, 0, 0).unwrap();
        assert!(!borrowing.is_overdue(before));
        assert!(borrowing.is_overdue(after));
    }

    #[test]
    fn test_returned_borrowing_is_never_overdue() {
        let json = r#"{
            "id": 4,
            "book": {"id": 4, "title": "Emma"},
            "borrow_date": "2024-01-01T00:00:00Z",
            "due_date": "2024-01-15T00:00:00Z",
            "return_date": "2024-02-01T00:00:00Z",
            "status": "lost"
        }"#;
        let borrowing: Borrowing = serde_json::from_str(json).unwrap();
        assert_eq!(borrowing.label(), "Emma");
        assert_eq!(borrowing.status, Some(BorrowStatus::Unknown));
        assert!(borrowing.is_returned());
        assert!(!borrowing.is_overdue(Utc::now()));
    }

    #[test]
    fn test_reading_stats_defaults() {
        let stats: ReadingStats = serde_json::from_str(
            r#"{"total_books_read": 3, "total_reading_time": 135, "favorite_genre": "None"}"#,
        )
        .unwrap();
        assert_eq!(stats.total_books_read, 3);
        assert_eq!(stats.favorite_genre(), None);
        assert_eq!(stats.reading_time_label(), "2h 15m");
        assert!(stats.monthly_reading.is_empty());
    }

    #[test]
    fn test_review_parsing() {
        let review: Review =
            serde_json::from_str(r#"{"id": "r1", "rating": 5, "comment": "Loved it"}"#).unwrap();
        assert_eq!(review.rating, 5);
        assert_eq!(review.helpful_count, 0);
        assert_eq!(review.created_at, None);
    }
}
