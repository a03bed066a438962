use anyhow::{Context, Result};
use dotenv::dotenv;
use production::{handler::AppRouter, state::AppState};
use shared::{
    config::{Config, ConnectionManager},
    schema::apply_schema,
    utils::init_logger,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let is_dev = std::env::var("DEV_MODE")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false);
    let is_enable_file = std::env::var("ENABLE_FILE_LOG")
        .map(|v| v == "true")
        .unwrap_or(false);

    let _log_guard = init_logger("production-service", is_dev, is_enable_file);

    let config = Config::init().context("Failed to load configuration")?;

    let pool = ConnectionManager::new_pool(
        &config.database.url,
        config.database.min_connections,
        config.database.max_connections,
        config.database.acquire_timeout,
    )
    .await
    .context("Failed to initialize database pool")?;

    if config.apply_schema {
        info!("📐 Applying database schema");
        apply_schema(&pool)
            .await
            .context("Failed to apply database schema")?;
    }

    let state = AppState::from_pool(pool.clone());

    AppRouter::serve(config.port, state)
        .await
        .context("Failed to start server")?;

    info!("🛑 Shutting down, closing database pool...");
    pool.close().await;

    Ok(())
}
