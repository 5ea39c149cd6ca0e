use anyhow::{Context, Result};

use lifelog::config::DashboardConfig;
use lifelog::dashboard::{self, ApiClient, DashboardState};
use lifelog::shutdown_signal;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lifelog=debug,lifelog_dashboard=debug,tower_http=info".into()),
        )
        .json()
        .init();

    let config = DashboardConfig::from_env()?;
    tracing::info!(api = %config.api_base_url, "Using LifeLog API");

    let state = DashboardState {
        api: ApiClient::new(config.api_base_url.clone()),
    };
    let app = dashboard::router(state);

    let addr = config.listen_addr();
    tracing::info!("Starting dashboard on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Dashboard server error")?;

    Ok(())
}
