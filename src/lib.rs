use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod dashboard;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
mod shutdown;
pub mod store;

use config::Config;
pub use shutdown::shutdown_signal;
use services::insight::InsightGenerator;
use store::LogStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn LogStore>,
    pub insights: InsightGenerator,
    pub config: Arc<Config>,
}

/// Build the API router with tracing and CORS applied.
pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readyz))
        .route("/log-day", post(handlers::daily_logs::create_log))
        .route("/logs", get(handlers::daily_logs::list_logs))
        .route("/logs/:date", get(handlers::daily_logs::get_log))
        .route("/insights/weekly", get(handlers::insights::weekly_insight))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = std::iter::once(&config.frontend_url)
        .chain(config.cors_extra_origins.iter())
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(hv) => Some(hv),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}
