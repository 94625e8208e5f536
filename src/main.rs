use std::sync::Arc;

use anyhow::Context;
use office_inventory_api::{
    app,
    config::{self, AppConfig},
    database::{InventoryStore, MemoryInventoryStore, PgInventoryStore},
    init_tracing, is_production,
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();
    init_tracing();

    let config = config::config();
    tracing::info!("Starting Office Inventory API in {:?} mode", config.environment);

    if config.security.jwt_secret.is_empty() {
        anyhow::bail!("JWT_SECRET must be set to verify bearer tokens");
    }

    let (store, pg_store) = build_store(config).await?;
    let app = app(AppState::new(store, config), config);

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Office Inventory API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    if let Some(pg_store) = pg_store {
        pg_store.close().await;
    }
    Ok(())
}

async fn build_store(
    config: &AppConfig,
) -> anyhow::Result<(Arc<dyn InventoryStore>, Option<PgInventoryStore>)> {
    match config.database.url.as_deref() {
        Some(url) => {
            let store = PgInventoryStore::connect(url, &config.database)
                .await
                .context("failed to connect to DATABASE_URL")?;
            if config.database.run_migrations {
                store.migrate().await.context("failed to run migrations")?;
            }
            let shared: Arc<dyn InventoryStore> = Arc::new(store.clone());
            Ok((shared, Some(store)))
        }
        None if is_production!() => {
            anyhow::bail!("DATABASE_URL must be set in production")
        }
        None => {
            tracing::warn!("DATABASE_URL not set; records are kept in memory and lost on exit");
            let shared: Arc<dyn InventoryStore> = Arc::new(MemoryInventoryStore::new());
            Ok((shared, None))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
