//! Query history: one record per successful current-weather lookup.

use async_trait::async_trait;
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use thiserror::Error;
use tokio::sync::Mutex;

/// Records kept by [`InMemoryHistory`] before the oldest are dropped.
pub const HISTORY_CAP: usize = 1000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: u64,
    pub city: String,
    pub temperature: f64,
    pub description: String,
    #[serde(with = "crate::timefmt")]
    pub timestamp: NaiveDateTime,
}

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history store unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait HistoryStore: Send + Sync {
    async fn record(
        &self,
        city: &str,
        temperature: f64,
        description: &str,
    ) -> Result<HistoryRecord, HistoryError>;

    /// Most recent records first.
    async fn recent(&self, limit: usize) -> Result<Vec<HistoryRecord>, HistoryError>;

    /// Returns `false` when no record has that id.
    async fn delete(&self, id: u64) -> Result<bool, HistoryError>;
}

#[derive(Debug, Default)]
pub struct InMemoryHistory {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    next_id: u64,
    records: VecDeque<HistoryRecord>,
}

impl InMemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistory {
    async fn record(
        &self,
        city: &str,
        temperature: f64,
        description: &str,
    ) -> Result<HistoryRecord, HistoryError> {
        let mut inner = self.inner.lock().await;
        inner.next_id += 1;

        let record = HistoryRecord {
            id: inner.next_id,
            city: city.to_string(),
            temperature,
            description: description.to_string(),
            timestamp: Local::now().naive_local(),
        };

        inner.records.push_back(record.clone());
        while inner.records.len() > HISTORY_CAP {
            inner.records.pop_front();
        }

        Ok(record)
    }

    async fn recent(&self, limit: usize) -> Result<Vec<HistoryRecord>, HistoryError> {
        let inner = self.inner.lock().await;
        Ok(inner.records.iter().rev().take(limit).cloned().collect())
    }

    async fn delete(&self, id: u64) -> Result<bool, HistoryError> {
        let mut inner = self.inner.lock().await;
        let before = inner.records.len();
        inner.records.retain(|r| r.id != id);
        Ok(inner.records.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn recent_returns_newest_first() {
        let store = InMemoryHistory::new();
        store.record("Oslo", 3.0, "snow").await.unwrap();
        store.record("Rome", 21.0, "clear sky").await.unwrap();
        store.record("Lima", 18.0, "mist").await.unwrap();

        let recent = store.recent(2).await.unwrap();

        let cities: Vec<&str> = recent.iter().map(|r| r.city.as_str()).collect();
        assert_eq!(cities, vec!["Lima", "Rome"]);
        assert!(recent[0].id > recent[1].id);
    }

    #[tokio::test]
    async fn delete_reports_whether_record_existed() {
        let store = InMemoryHistory::new();
        let rec = store.record("Oslo", 3.0, "snow").await.unwrap();

        assert!(store.delete(rec.id).await.unwrap());
        assert!(!store.delete(rec.id).await.unwrap());
        assert!(store.recent(10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = InMemoryHistory::new();
        let first = store.record("Oslo", 3.0, "snow").await.unwrap();
        store.delete(first.id).await.unwrap();
        let second = store.record("Oslo", 4.0, "snow").await.unwrap();

        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn oldest_records_are_evicted_past_cap() {
        let store = InMemoryHistory::new();
        for i in 0..(HISTORY_CAP + 5) {
            store.record(&format!("city-{i}"), 0.0, "x").await.unwrap();
        }

        let all = store.recent(usize::MAX).await.unwrap();
        assert_eq!(all.len(), HISTORY_CAP);
        assert_eq!(all.last().map(|r| r.city.as_str()), Some("city-5"));
    }
}
