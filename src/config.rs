use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use dotenvy::dotenv;

use crate::data::mock::MockOptions;

#[derive(Clone, Debug)]
pub struct Config {
    /// Artificial delay for every data-source call.
    pub latency: Duration,
    pub log_dir: String,
    pub log_level: tracing::Level,
    pub history_days: u32,
    pub cache_ttl: Duration,

    // Demo login used by the binary
    pub demo_email: String,
    pub demo_password: String,
}

fn var_or<T>(key: &str, default: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw = env::var(key).unwrap_or_else(|_| default.to_string());
    raw.trim()
        .parse()
        .with_context(|| format!("{key} has an invalid value: {raw:?}"))
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let log_level: String = var_or("PRESENCE_LOG_LEVEL", "info")?;
        Ok(Self {
            latency: Duration::from_millis(var_or("PRESENCE_LATENCY_MS", "300")?),
            log_dir: var_or("PRESENCE_LOG_DIR", "logs")?,
            log_level: tracing::Level::from_str(&log_level)
                .map_err(|_| anyhow::anyhow!("PRESENCE_LOG_LEVEL has an invalid value: {log_level:?}"))?,
            history_days: var_or("PRESENCE_HISTORY_DAYS", "90")?,
            cache_ttl: Duration::from_secs(var_or("PRESENCE_CACHE_TTL_SECS", "300")?),
            demo_email: var_or("PRESENCE_DEMO_EMAIL", "mashaal@testsolz.com")?,
            demo_password: var_or("PRESENCE_DEMO_PASSWORD", "test123")?,
        })
    }

    pub fn mock_options(&self) -> MockOptions {
        MockOptions {
            latency: self.latency,
            history_days: self.history_days,
            cache_ttl: self.cache_ttl,
        }
    }
}
