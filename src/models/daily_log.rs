use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// One day's wellness record as stored in `daily_logs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct LogEntry {
    pub id: Uuid,
    pub log_date: NaiveDate,
    pub mood: Option<i32>,
    pub sleep_hours: Option<f64>,
    pub steps: Option<i64>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// POST /log-day
///
/// Ranges are only checked when strict validation is enabled; by default
/// out-of-range values are stored as submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct NewLogEntry {
    pub log_date: NaiveDate,

    #[serde(default)]
    #[validate(range(min = 1, max = 10, message = "Mood must be between 1 and 10"))]
    pub mood: Option<i32>,

    #[serde(default)]
    #[validate(range(min = 0.0, max = 24.0, message = "Sleep must be between 0 and 24 hours"))]
    pub sleep_hours: Option<f64>,

    #[serde(default)]
    #[validate(range(min = 0, message = "Steps cannot be negative"))]
    pub steps: Option<i64>,

    #[serde(default)]
    #[validate(length(max = 2000, message = "Notes must be under 2000 characters"))]
    pub notes: Option<String>,
}

impl NewLogEntry {
    pub fn on(log_date: NaiveDate) -> Self {
        Self {
            log_date,
            mood: None,
            sleep_hours: None,
            steps: None,
            notes: None,
        }
    }

    pub fn into_entry(self, id: Uuid, created_at: DateTime<Utc>) -> LogEntry {
        LogEntry {
            id,
            log_date: self.log_date,
            mood: self.mood,
            sleep_hours: self.sleep_hours,
            steps: self.steps,
            notes: self.notes,
            created_at,
        }
    }
}
