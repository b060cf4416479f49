use std::sync::Arc;

use anyhow::Context;

use miranda_api::config::{AppConfig, StoreKind};
use miranda_infra::{DocumentStore, InMemoryDocumentStore, PostgresDocumentStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // `.env` may carry RUST_LOG / LOG_FORMAT, so load it before logging starts.
    dotenvy::dotenv().ok();
    miranda_observability::init();

    let config = AppConfig::from_env().inspect_err(|e| tracing::error!(error = %e, "invalid configuration"))?;

    let mut postgres = None;
    let store: Arc<dyn DocumentStore> = match config.store_kind()? {
        StoreKind::Postgres => {
            let pg = PostgresDocumentStore::connect(&config.database_url, config.db_max_connections)
                .await
                .inspect_err(|e| tracing::error!(error = %e, "database connection failed"))?;
            pg.ensure_schema()
                .await
                .inspect_err(|e| tracing::error!(error = %e, "schema setup failed"))?;
            tracing::info!("connected to postgres document store");
            let pg = Arc::new(pg);
            postgres = Some(Arc::clone(&pg));
            pg
        }
        StoreKind::InMemory => {
            tracing::warn!("using in-memory document store; data is lost on exit");
            Arc::new(InMemoryDocumentStore::new())
        }
    };

    let app = miranda_api::app::build_app(&config, store);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    if let Some(pg) = postgres {
        pg.close().await;
    }
    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        return;
    }
    tracing::info!("shutdown signal received");
}
