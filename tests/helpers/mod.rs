#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use lifelog::config::Config;
use lifelog::services::completion::{CompletionClient, CompletionError, CompletionRequest};
use lifelog::services::insight::InsightGenerator;
use lifelog::store::MemoryLogStore;
use lifelog::{router, AppState};

/// Completion client that records every request and replies with a canned answer.
pub struct StubClient {
    reply: Option<String>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl StubClient {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(text.to_string()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: None,
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionClient for StubClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
        self.requests.lock().unwrap().push(request);
        match &self.reply {
            Some(text) => Ok(text.clone()),
            None => Err(CompletionError::Status {
                status: 500,
                body: "upstream exploded".into(),
            }),
        }
    }
}

pub fn test_config(strict_validation: bool) -> Config {
    let strict = if strict_validation { "true" } else { "false" };
    Config::from_lookup(|key| match key {
        "STORAGE_BACKEND" => Some("memory".to_string()),
        "STRICT_VALIDATION" => Some(strict.to_string()),
        _ => None,
    })
    .unwrap()
}

pub fn test_state(client: Arc<StubClient>, strict_validation: bool) -> AppState {
    AppState {
        store: Arc::new(MemoryLogStore::new()),
        insights: InsightGenerator::new(client, "gpt-4o-mini"),
        config: Arc::new(test_config(strict_validation)),
    }
}

/// API router over a fresh in-memory store.
pub fn test_app(client: Arc<StubClient>) -> Router {
    router(test_state(client, false))
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

/// Serve `app` on an ephemeral local port and return its base URL.
pub async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}
