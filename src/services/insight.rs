use std::fmt::Display;
use std::sync::Arc;

use crate::models::daily_log::LogEntry;
use crate::services::completion::{ChatMessage, CompletionClient, CompletionError, CompletionRequest};

pub const NO_DATA_INSIGHT: &str = "Not enough data to generate insights yet.";
pub const SYSTEM_PROMPT: &str = "You analyze personal wellness data.";
pub const MAX_INSIGHT_TOKENS: u32 = 150;

/// How many entries the weekly insight looks at: the most recent stored
/// entries, not the last seven calendar days.
pub const WEEKLY_ENTRY_COUNT: usize = 7;

#[derive(Debug, thiserror::Error)]
pub enum InsightError {
    #[error(transparent)]
    Completion(#[from] CompletionError),
}

#[derive(Clone)]
pub struct InsightGenerator {
    client: Arc<dyn CompletionClient>,
    model: String,
}

impl InsightGenerator {
    pub fn new(client: Arc<dyn CompletionClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// Summarize `entries` in the order given. An empty slice returns
    /// [`NO_DATA_INSIGHT`] without calling the completion service.
    pub async fn generate(&self, entries: &[LogEntry]) -> Result<String, InsightError> {
        if entries.is_empty() {
            return Ok(NO_DATA_INSIGHT.to_string());
        }

        let request = CompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(SYSTEM_PROMPT),
                ChatMessage::user(render_prompt(entries)),
            ],
            max_tokens: MAX_INSIGHT_TOKENS,
        };

        tracing::info!(entries = entries.len(), model = %self.model, "Requesting weekly insight");
        let text = self.client.complete(request).await?;
        Ok(text.trim().to_string())
    }
}

pub fn render_entry(entry: &LogEntry) -> String {
    format!(
        "Date: {}, Mood: {}, Sleep: {} hrs, Steps: {}",
        entry.log_date,
        or_none(entry.mood),
        or_none(entry.sleep_hours),
        or_none(entry.steps),
    )
}

pub fn render_prompt(entries: &[LogEntry]) -> String {
    let lines: Vec<String> = entries.iter().map(render_entry).collect();

    format!(
        r#"
You are a personal analytics assistant.

Here are the last few days of personal wellness data:
{}

Provide:
- A concise summary (2–3 sentences)
- One pattern you notice
- One gentle recommendation

Keep the tone calm, practical, and non-judgmental.
"#,
        lines.join("\n")
    )
}

fn or_none<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| "None".to_string(), |v| v.to_string())
}
