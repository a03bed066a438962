use crate::config::ConnectionPool;
use anyhow::{Context, Result};
use tracing::info;

/// DDL for the catalog tables. Every statement is `IF NOT EXISTS`, so
/// applying it to an already provisioned database is a no-op.
pub const SCHEMA_SQL: &str = include_str!("../schema.sql");

pub async fn apply_schema(pool: &ConnectionPool) -> Result<()> {
    info!("🧱 Applying catalog schema");

    sqlx::raw_sql(SCHEMA_SQL)
        .execute(pool)
        .await
        .context("Failed to apply catalog schema")?;

    info!("✅ Catalog schema is in place");
    Ok(())
}
