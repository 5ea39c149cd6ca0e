//! Record store for daily log entries.
//!
//! [`LogStore`] is the repository seam between the HTTP handlers and the
//! persistence backend. [`PgLogStore`] is the production implementation;
//! [`MemoryLogStore`] keeps rows in process for local demos and tests.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::models::daily_log::{LogEntry, NewLogEntry};

mod memory;
mod postgres;

pub use memory::MemoryLogStore;
pub use postgres::PgLogStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("entry for {0} already exists")]
    DuplicateDate(NaiveDate),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait LogStore: Send + Sync {
    /// Insert a new entry. At most one entry may exist per `log_date`;
    /// a second insert for the same date fails with `DuplicateDate`.
    async fn create(&self, entry: NewLogEntry) -> StoreResult<LogEntry>;

    /// All entries, newest `log_date` first.
    async fn list(&self) -> StoreResult<Vec<LogEntry>>;

    /// The `limit` most recently dated entries, newest first.
    async fn recent(&self, limit: usize) -> StoreResult<Vec<LogEntry>>;

    async fn find_by_date(&self, log_date: NaiveDate) -> StoreResult<Option<LogEntry>>;

    /// Round-trip to the backend for readiness checks.
    async fn ping(&self) -> StoreResult<()>;
}
