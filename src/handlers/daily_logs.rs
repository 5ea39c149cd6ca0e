use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use chrono::NaiveDate;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::daily_log::{LogEntry, NewLogEntry};
use crate::AppState;

pub async fn create_log(
    State(state): State<AppState>,
    payload: Result<Json<NewLogEntry>, JsonRejection>,
) -> AppResult<Json<LogEntry>> {
    let Json(body) = payload?;

    if state.config.strict_validation {
        body.validate()?;
    }

    let log_date = body.log_date;
    let log = state.store.create(body).await.map_err(|e| {
        tracing::warn!(%log_date, error = %e, "Rejected daily log");
        e
    })?;

    tracing::info!(id = %log.id, %log_date, "Daily log created");
    Ok(Json(log))
}

pub async fn list_logs(State(state): State<AppState>) -> AppResult<Json<Vec<LogEntry>>> {
    let logs = state.store.list().await?;
    Ok(Json(logs))
}

pub async fn get_log(
    State(state): State<AppState>,
    log_date: Result<Path<NaiveDate>, PathRejection>,
) -> AppResult<Json<LogEntry>> {
    let Path(log_date) = log_date.map_err(|e| AppError::Validation(e.body_text()))?;

    let log = state
        .store
        .find_by_date(log_date)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No log for {log_date}")))?;

    Ok(Json(log))
}
