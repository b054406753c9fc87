use anyhow::Result;
use std::time::Duration;

use marketplace_api::{
    config::AppConfig,
    database::Database,
    shutdown::{GracefulShutdown, ShutdownError},
    tracing as app_tracing,
    web::{create_router, AppState},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present so cargo run picks up APP__DATABASE__URL etc.
    let _ = dotenvy::dotenv();

    let config = AppConfig::load()?;

    let _guard = app_tracing::init_tracing(&config)?;

    tracing::info!("Configuration loaded and tracing initialized");

    let database = Database::new(&config.database).await?;
    database.health_check().await?;
    database.migrate().await?;

    let addr = config.server.socket_addr()?;
    let shutdown = GracefulShutdown::new(Duration::from_secs(
        config.server.graceful_shutdown_timeout_seconds,
    ));

    let state = AppState::new(config, database.pool_cloned());
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server listening on {}", addr);

    let signal_listener = shutdown.clone();
    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            signal_listener.wait_for_shutdown_signal().await;
        })
        .await?;

    shutdown
        .execute_shutdown(|| async {
            database.close().await;
            Ok::<(), ShutdownError>(())
        })
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
