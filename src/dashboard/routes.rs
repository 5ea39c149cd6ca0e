use axum::{
    extract::{rejection::FormRejection, State},
    response::Html,
    Form,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;

use super::client::ApiClient;
use super::render::{render_about, render_dashboard, DashboardView, Flash};
use crate::models::daily_log::NewLogEntry;

#[derive(Clone)]
pub struct DashboardState {
    pub api: ApiClient,
}

/// The entry form as posted by the browser.
#[derive(Debug, Deserialize)]
pub struct EntryForm {
    pub log_date: NaiveDate,
    pub mood: i32,
    pub sleep_hours: f64,
    pub steps: i64,
    #[serde(default)]
    pub notes: String,
}

impl From<EntryForm> for NewLogEntry {
    fn from(form: EntryForm) -> Self {
        NewLogEntry {
            log_date: form.log_date,
            mood: Some(form.mood),
            sleep_hours: Some(form.sleep_hours),
            steps: Some(form.steps),
            notes: (!form.notes.is_empty()).then_some(form.notes),
        }
    }
}

pub async fn show_dashboard(State(state): State<DashboardState>) -> Html<String> {
    Html(render_page(&state, None).await)
}

pub async fn submit_entry(
    State(state): State<DashboardState>,
    form: Result<Form<EntryForm>, FormRejection>,
) -> Html<String> {
    let flash = match form {
        Err(rejection) => Flash::Error(rejection.body_text()),
        Ok(Form(form)) => match state.api.create(&form.into()).await {
            Ok(created) => {
                tracing::info!(id = %created.id, log_date = %created.log_date, "Entry saved");
                Flash::Saved
            }
            Err(e) => {
                tracing::warn!(error = %e, "Entry rejected");
                Flash::Error(e.to_string())
            }
        },
    };

    Html(render_page(&state, Some(flash)).await)
}

pub async fn show_about() -> Html<String> {
    Html(render_about())
}

async fn render_page(state: &DashboardState, flash: Option<Flash>) -> String {
    let entries = state.api.list().await.map_err(|e| {
        tracing::warn!(error = %e, "Could not load entries");
        format!("Could not load entries: {e}")
    });

    // The insight is only worth asking for once there is something to summarize.
    let insight = match &entries {
        Ok(list) if !list.is_empty() => match state.api.weekly_insight().await {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::warn!(error = %e, "Insight unavailable");
                None
            }
        },
        _ => None,
    };

    let view = DashboardView {
        today: today(),
        flash,
        entries,
        insight,
    };
    render_dashboard(&view)
}

/// Default for the form's date field: the calendar day where the dashboard runs.
fn today() -> NaiveDate {
    Local::now().date_naive()
}
