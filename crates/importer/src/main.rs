use anyhow::{Context, Result};
use dotenv::dotenv;
use importer::{config::ImporterConfig, runner::Importer, workbook::read_rows};
use shared::{config::ConnectionManager, utils::init_logger};
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

    let _log_guard = init_logger("importer", is_dev, is_enable_file);

    let config = ImporterConfig::init().context("Failed to load configuration")?;

    let rows = read_rows(&config.workbook_path)?;

    let pool = ConnectionManager::new_pool(&config.database_url, 1, 2, config.acquire_timeout)
        .await
        .context("Failed to initialize database pool")?;

    info!("🚚 Importing {}", config.workbook_path.display());
    let summary = Importer::from_pool(pool.clone()).run(&rows).await;

    println!("{summary}");

    pool.close().await;
    Ok(())
}
