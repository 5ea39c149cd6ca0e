use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::services::insight::WEEKLY_ENTRY_COUNT;
use crate::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct InsightResponse {
    pub insight: String,
}

/// GET /insights/weekly
///
/// Summarizes the seven most recently dated entries, newest first.
/// Completion failures surface as 502.
pub async fn weekly_insight(State(state): State<AppState>) -> AppResult<Json<InsightResponse>> {
    let logs = state.store.recent(WEEKLY_ENTRY_COUNT).await?;
    let insight = state.insights.generate(&logs).await?;

    Ok(Json(InsightResponse { insight }))
}
