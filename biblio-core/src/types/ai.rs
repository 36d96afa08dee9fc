//! Recommendation, AI search and health payloads
//!
//! These endpoints belong to the backend; the client passes their results
//! through with light typing only.

use super::BookRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A recommended book with the engine's confidence and reason
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub book: BookRecord,

    #[serde(default, alias = "confidence")]
    pub score: f64,

    #[serde(default)]
    pub reason: Option<String>,
}

/// One hit of the semantic search endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchHit {
    pub book: BookRecord,

    #[serde(default)]
    pub similarity_score: Option<f64>,
}

/// Response of `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthStatus {
    pub status: String,

    #[serde(default)]
    pub database: Option<bool>,

    #[serde(default)]
    pub ai_models: BTreeMap<String, bool>,
}

impl HealthStatus {
    /// The backend reports "healthy"; older builds answered "ok"
    pub fn is_healthy(&self) -> bool {
        matches!(self.status.as_str(), "healthy" | "ok")
    }
}
