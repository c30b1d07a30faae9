use anyhow::Context;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use learnpath::app;
use learnpath::state::{AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "learnpath=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    let catalog = config.load_catalog().context("Failed to load catalog")?;
    info!(
        "Loaded {} resources in categories {:?}",
        catalog.total_resources(),
        catalog.category_names()
    );

    let state = Arc::new(AppState::new(catalog, config.latency_ms.clone()));
    let app = app(state, &config);

    let listener = tokio::net::TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_address()))?;
    info!(
        "Server running on http://{} (production: {})",
        listener.local_addr()?,
        config.production
    );
    axum::serve(listener, app).await?;
    Ok(())
}
