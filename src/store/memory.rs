use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{LogStore, StoreError, StoreResult};
use crate::models::daily_log::{LogEntry, NewLogEntry};

/// Entries keyed by date, so iteration order is the date order.
#[derive(Clone, Default)]
pub struct MemoryLogStore {
    entries: Arc<RwLock<BTreeMap<NaiveDate, LogEntry>>>,
}

impl MemoryLogStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LogStore for MemoryLogStore {
    async fn create(&self, entry: NewLogEntry) -> StoreResult<LogEntry> {
        let mut entries = self.entries.write().await;
        if entries.contains_key(&entry.log_date) {
            return Err(StoreError::DuplicateDate(entry.log_date));
        }

        let log_date = entry.log_date;
        let created = entry.into_entry(Uuid::new_v4(), Utc::now());
        entries.insert(log_date, created.clone());
        Ok(created)
    }

    async fn list(&self) -> StoreResult<Vec<LogEntry>> {
        let entries = self.entries.read().await;
        Ok(entries.values().rev().cloned().collect())
    }

    async fn recent(&self, limit: usize) -> StoreResult<Vec<LogEntry>> {
        let entries = self.entries.read().await;
        Ok(entries.values().rev().take(limit).cloned().collect())
    }

    async fn find_by_date(&self, log_date: NaiveDate) -> StoreResult<Option<LogEntry>> {
        let entries = self.entries.read().await;
        Ok(entries.get(&log_date).cloned())
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
