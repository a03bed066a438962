use anyhow::{Context, Result, anyhow};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub min_connections: u32,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub apply_schema: bool,
    pub port: u16,
}

impl Config {
    pub fn init() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup("DATABASE_URL").context("Missing environment variable: DATABASE_URL")?;

        let apply_schema = match lookup("APPLY_SCHEMA") {
            Some(value) => parse_bool_flag("APPLY_SCHEMA", &value)?,
            None => false,
        };

        let port = lookup("PORT")
            .unwrap_or_else(|| "8080".to_string())
            .parse::<u16>()
            .context("PORT must be a valid u16 integer")?;

        let min_connections = lookup("DB_MIN_CONN")
            .unwrap_or_else(|| "1".to_string())
            .parse::<u32>()
            .context("DB_MIN_CONN must be a valid u32 integer")?;

        let max_connections = lookup("DB_MAX_CONN")
            .unwrap_or_else(|| "5".to_string())
            .parse::<u32>()
            .context("DB_MAX_CONN must be a valid u32 integer")?;

        if max_connections == 0 || min_connections > max_connections {
            return Err(anyhow!(
                "DB_MAX_CONN must be positive and not below DB_MIN_CONN, got min={} max={}",
                min_connections,
                max_connections
            ));
        }

        let acquire_timeout_secs = lookup("DB_ACQUIRE_TIMEOUT_SECS")
            .unwrap_or_else(|| "5".to_string())
            .parse::<u64>()
            .context("DB_ACQUIRE_TIMEOUT_SECS must be a valid u64 integer")?;

        Ok(Self {
            database: DatabaseConfig {
                url,
                min_connections,
                max_connections,
                acquire_timeout: Duration::from_secs(acquire_timeout_secs),
            },
            apply_schema,
            port,
        })
    }
}

pub fn parse_bool_flag(name: &str, value: &str) -> Result<bool> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(anyhow!("{} must be 'true' or 'false', got '{}'", name, other)),
    }
}
