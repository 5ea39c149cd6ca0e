//! Browser dashboard for LifeLog.
//!
//! Runs as its own binary and talks to the API over HTTP like any other
//! client; all aggregation happens here on the fetched list.

use axum::{routing::get, Router};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

pub mod client;
pub mod render;
pub mod routes;
pub mod stats;

pub use client::{ApiClient, ApiError};
pub use routes::DashboardState;

pub fn router(state: DashboardState) -> Router {
    Router::new()
        .route("/", get(routes::show_dashboard).post(routes::submit_entry))
        .route("/about", get(routes::show_about))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
