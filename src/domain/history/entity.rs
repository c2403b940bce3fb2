//! Explanation history entries

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::llm::ExplanationResult;

/// A saved explanation, newest entries are kept first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub term: String,
    pub explanation: String,
    pub model_id: String,
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
}

impl HistoryEntry {
    pub fn new(result: &ExplanationResult, at: DateTime<Utc>) -> Self {
        Self {
            id: format!("{}_{}", at.timestamp_millis(), Uuid::new_v4().simple()),
            term: result.term.clone(),
            explanation: result.explanation_text.clone(),
            model_id: result.profile_id.clone(),
            timestamp: at.timestamp_millis(),
        }
    }

    /// Whether the entry is older than `retention` relative to `now`
    pub fn is_expired(&self, now: DateTime<Utc>, retention: Duration) -> bool {
        self.timestamp <= (now - retention).timestamp_millis()
    }
}
