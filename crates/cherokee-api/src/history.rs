//! In-memory record of successful generations.
//!
//! Owned by [`AppState`](crate::state::AppState) and shared with handlers by
//! `Arc`; entries live for the lifetime of the process.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// One successful generation, as returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub prompt: String,
    pub provider: String,
    pub code: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct HistoryStore {
    entries: RwLock<Vec<HistoryEntry>>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a generation and return the stored entry.
    pub async fn record(&self, prompt: String, provider: String, code: String) -> HistoryEntry {
        let entry = HistoryEntry {
            prompt,
            provider,
            code,
            created_at: Utc::now(),
        };
        self.entries.write().await.push(entry.clone());
        entry
    }

    /// Snapshot of all entries in insertion order.
    pub async fn list(&self) -> Vec<HistoryEntry> {
        self.entries.read().await.clone()
    }
}
