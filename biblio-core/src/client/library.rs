//! Lending, reading activity, reviews and similar-book endpoints

use super::{ApiClient, ListBody};
use crate::error::Result;
use crate::types::{
    BookId, BorrowRequest, Borrowing, ReadingStats, Recommendation, ReturnReceipt, Review,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Everything the dashboard view shows for the logged-in user
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Dashboard {
    pub stats: ReadingStats,
    pub borrowings: Vec<Borrowing>,
}

impl Dashboard {
    /// Borrowings not yet returned
    pub fn active(&self) -> impl Iterator<Item = &Borrowing> {
        self.borrowings.iter().filter(|b| !b.is_returned())
    }

    pub fn overdue_count(&self, now: DateTime<Utc>) -> usize {
        self.active().filter(|b| b.is_overdue(now)).count()
    }

    /// Sum of outstanding fines
    pub fn total_fines(&self) -> f64 {
        self.borrowings.iter().map(|b| b.fine_amount).sum()
    }
}

fn id_segment(id: &BookId) -> String {
    urlencoding::encode(&id.to_string()).into_owned()
}

impl ApiClient {
    /// `GET /my-borrowings`
    pub async fn my_borrowings(&self) -> Result<Vec<Borrowing>> {
        let body: ListBody<Borrowing> = self.get_json("/my-borrowings").await?;
        Ok(body.into_vec())
    }

    /// `GET /reading/stats`
    pub async fn reading_stats(&self) -> Result<ReadingStats> {
        self.get_json("/reading/stats").await
    }

    /// Reading stats and borrowings, fetched concurrently
    pub async fn dashboard(&self) -> Result<Dashboard> {
        let (stats, borrowings) = tokio::try_join!(self.reading_stats(), self.my_borrowings())?;
        Ok(Dashboard { stats, borrowings })
    }

    /// `POST /borrow`
    pub async fn borrow(&self, book_id: &BookId) -> Result<Borrowing> {
        let request = BorrowRequest {
            book_id: book_id.clone(),
        };
        self.post_json("/borrow", &request).await
    }

    /// `POST /return/{borrowing_id}`
    pub async fn return_book(&self, borrowing_id: &BookId) -> Result<ReturnReceipt> {
        let path = format!("/return/{}", id_segment(borrowing_id));
        self.post_json(&path, &serde_json::json!({})).await
    }

    /// `GET /books/{book_id}/reviews`
    pub async fn book_reviews(&self, book_id: &BookId) -> Result<Vec<Review>> {
        let path = format!("/books/{}/reviews", id_segment(book_id));
        let body: ListBody<Review> = self.get_json(&path).await?;
        Ok(body.into_vec())
    }

    /// `GET /recommendations/{book_id}?limit=...` - books similar to one book
    pub async fn similar_books(&self, book_id: &BookId, limit: usize) -> Result<Vec<Recommendation>> {
        let path = format!("/recommendations/{}?limit={}", id_segment(book_id), limit);
        let body: ListBody<Recommendation> = self.get_json(&path).await?;
        Ok(body.into_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn borrowing(id: u64, due: Option<&str>, returned: Option<&str>, fine: f64) -> Borrowing {
        let mut value = serde_json::json!({"id": id, "book_id": id, "fine_amount": fine});
        if let Some(due) = due {
            value["due_date"] = due.into();
        }
        if let Some(returned) = returned {
            value["returned_date"] = returned.into();
        }
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_dashboard_summaries() {
        let dashboard = Dashboard {
            stats: ReadingStats::default(),
            borrowings: vec![
                borrowing(1, Some("2024-03-01T00:00:00Z"), None, 1.5),
                borrowing(2, Some("2024-06-01T00:00:00Z"), None, 0.0),
                borrowing(3, Some("2024-01-01T00:00:00Z"), Some("2024-01-20T00:00:00Z"), 2.0),
            ],
        };
        let now = Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap();

        assert_eq!(dashboard.active().count(), 2);
        assert_eq!(dashboard.overdue_count(now), 1);
        assert_eq!(dashboard.total_fines(), 3.5);
    }

    #[test]
    fn test_id_segment_is_encoded() {
        assert_eq!(id_segment(&BookId::Number(7)), "7");
        assert_eq!(id_segment(&BookId::from("a b/c")), "a%20b%2Fc");
    }
}
