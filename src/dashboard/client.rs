use serde::Deserialize;

use crate::handlers::insights::InsightResponse;
use crate::models::daily_log::{LogEntry, NewLogEntry};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{message}")]
    Rejected { status: u16, message: String },
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// HTTP client for the LifeLog API.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub async fn create(&self, entry: &NewLogEntry) -> Result<LogEntry, ApiError> {
        let response = self
            .http
            .post(format!("{}/log-day", self.base_url))
            .json(entry)
            .send()
            .await?;
        Ok(parse(response).await?.json().await?)
    }

    pub async fn list(&self) -> Result<Vec<LogEntry>, ApiError> {
        let response = self.http.get(format!("{}/logs", self.base_url)).send().await?;
        Ok(parse(response).await?.json().await?)
    }

    pub async fn weekly_insight(&self) -> Result<String, ApiError> {
        let response = self
            .http
            .get(format!("{}/insights/weekly", self.base_url))
            .send()
            .await?;
        let body: InsightResponse = parse(response).await?.json().await?;
        Ok(body.insight)
    }
}

/// Pass successful responses through; turn failures into the server's message.
async fn parse(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .json::<ErrorEnvelope>()
        .await
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| "Error".to_string());

    Err(ApiError::Rejected {
        status: status.as_u16(),
        message,
    })
}
