use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use super::{LogStore, StoreError, StoreResult};
use crate::models::daily_log::{LogEntry, NewLogEntry};

#[derive(Clone)]
pub struct PgLogStore {
    pool: PgPool,
}

impl PgLogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LogStore for PgLogStore {
    async fn create(&self, entry: NewLogEntry) -> StoreResult<LogEntry> {
        // The unique index on log_date decides races; no row back means a duplicate.
        let created = sqlx::query_as::<_, LogEntry>(
            r#"
            INSERT INTO daily_logs (id, log_date, mood, sleep_hours, steps, notes)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (log_date) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(entry.log_date)
        .bind(entry.mood)
        .bind(entry.sleep_hours)
        .bind(entry.steps)
        .bind(&entry.notes)
        .fetch_optional(&self.pool)
        .await?;

        created.ok_or(StoreError::DuplicateDate(entry.log_date))
    }

    async fn list(&self) -> StoreResult<Vec<LogEntry>> {
        let logs = sqlx::query_as::<_, LogEntry>(
            "SELECT * FROM daily_logs ORDER BY log_date DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(logs)
    }

    async fn recent(&self, limit: usize) -> StoreResult<Vec<LogEntry>> {
        let logs = sqlx::query_as::<_, LogEntry>(
            "SELECT * FROM daily_logs ORDER BY log_date DESC LIMIT $1",
        )
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await?;

        Ok(logs)
    }

    async fn find_by_date(&self, log_date: NaiveDate) -> StoreResult<Option<LogEntry>> {
        let log = sqlx::query_as::<_, LogEntry>("SELECT * FROM daily_logs WHERE log_date = $1")
            .bind(log_date)
            .fetch_optional(&self.pool)
            .await?;

        Ok(log)
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}
