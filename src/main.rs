use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::PgPool;

use lifelog::config::{Config, StorageBackend};
use lifelog::services::completion::OpenAiClient;
use lifelog::services::insight::InsightGenerator;
use lifelog::store::{LogStore, MemoryLogStore, PgLogStore};
use lifelog::{db, router, shutdown_signal, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lifelog=debug,lifelog_api=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let config = Arc::new(Config::from_env()?);

    let (store, pool): (Arc<dyn LogStore>, Option<PgPool>) = match config.storage_backend {
        StorageBackend::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL must be set")?;
            let pool = db::create_pool(url).await?;
            db::run_migrations(&pool).await?;
            let store: Arc<dyn LogStore> = Arc::new(PgLogStore::new(pool.clone()));
            (store, Some(pool))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory store; entries are lost on restart");
            let store: Arc<dyn LogStore> = Arc::new(MemoryLogStore::new());
            (store, None)
        }
    };

    if config.openai_api_key.is_none() {
        tracing::warn!("OPENAI_API_KEY not set, weekly insights will fail");
    }
    let client = OpenAiClient::new(
        config.openai_api_key.clone(),
        config.openai_base_url.clone(),
        config.insight_timeout(),
    )
    .context("Failed to build completion client")?;
    let insights = InsightGenerator::new(Arc::new(client), config.openai_model.clone());

    let state = AppState {
        store,
        insights,
        config: config.clone(),
    };
    let app = router(state);

    let addr = config.listen_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    if let Some(pool) = pool {
        db::close_pool(pool).await;
    }
    tracing::info!("Server stopped");
    Ok(())
}
