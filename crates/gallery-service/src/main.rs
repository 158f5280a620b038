//! Online gallery service - storefront API and frontend host.
//!
//! This is the main entry point for the gallery service.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gallery_service::{create_router, AppState, ServiceConfig};
use gallery_store::PgStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is fine
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,gallery=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Ok(path) = dotenv {
        tracing::debug!(path = %path.display(), "Loaded .env file");
    }

    tracing::info!("Starting gallery service");

    let config = ServiceConfig::from_env();

    tracing::info!(
        listen_addr = %config.listen_addr(),
        database_url_set = %config.database_url.is_some(),
        static_dir = %config.static_dir.display(),
        run_migrations = %config.run_migrations,
        "Service configuration loaded"
    );

    let store = PgStore::connect(
        config.pg_connect_options()?,
        config.database_max_connections,
        config.database_acquire_timeout(),
    )
    .await?;
    tracing::info!("Connected to PostgreSQL");

    if config.run_migrations {
        store.migrate().await?;
    }

    let state = AppState::new(Arc::new(store), config.clone());

    let app = create_router(state);
    tracing::info!("Router configured with all API endpoints");

    tracing::info!(listen_addr = %config.listen_addr(), "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
