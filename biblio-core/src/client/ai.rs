//! Recommendation, semantic search and health endpoints

use super::{ApiClient, ListBody};
use crate::error::Result;
use crate::types::{BookRecord, HealthStatus, Recommendation, SearchHit};
use serde::Deserialize;

/// Search entries are scored hits or plain book records
#[derive(Deserialize)]
#[serde(untagged)]
enum SearchEntry {
    Hit(SearchHit),
    Book(BookRecord),
}

impl From<SearchEntry> for SearchHit {
    fn from(entry: SearchEntry) -> Self {
        match entry {
            SearchEntry::Hit(hit) => hit,
            SearchEntry::Book(book) => SearchHit {
                book,
                similarity_score: None,
            },
        }
    }
}

impl ApiClient {
    /// `GET /ai/recommend/{user_id}`
    pub async fn recommend(&self, user_id: &str) -> Result<Vec<Recommendation>> {
        let path = format!("/ai/recommend/{}", urlencoding::encode(user_id));
        let body: ListBody<Recommendation> = self.get_json(&path).await?;
        Ok(body.into_vec())
    }

    /// `GET /ai/search?query=...`
    pub async fn ai_search(&self, query: &str) -> Result<Vec<SearchHit>> {
        let path = format!("/ai/search?query={}", urlencoding::encode(query));
        let body: ListBody<SearchEntry> = self.get_json(&path).await?;
        Ok(body.into_vec().into_iter().map(SearchHit::from).collect())
    }

    /// `GET /health`
    pub async fn health(&self) -> Result<HealthStatus> {
        self.get_json("/health").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_body_shapes() {
        let bare: ListBody<Recommendation> =
            serde_json::from_str(r#"[{"book": {"id": 1}, "score": 0.9}]"#).unwrap();
        assert_eq!(bare.into_vec().len(), 1);

        let wrapped: ListBody<Recommendation> = serde_json::from_str(
            r#"{"recommendations": [{"book": {"id": 1}, "score": 0.9, "reason": "Trending now"}]}"#,
        )
        .unwrap();
        let items = wrapped.into_vec();
        assert_eq!(items[0].reason.as_deref(), Some("Trending now"));
    }

    #[test]
    fn test_search_entries_accept_plain_books() {
        let body: ListBody<SearchEntry> = serde_json::from_str(
            r#"[{"book": {"id": 1, "title": "Emma"}, "similarity_score": 0.8}, {"id": 2, "title": "Dune"}]"#,
        )
        .unwrap();
        let hits: Vec<SearchHit> = body.into_vec().into_iter().map(SearchHit::from).collect();
        assert_eq!(hits[0].similarity_score, Some(0.8));
        assert_eq!(hits[1].book.display_title(), "Dune");
        assert_eq!(hits[1].similarity_score, None);
    }
}
