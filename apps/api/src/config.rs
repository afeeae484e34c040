use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Base URL of a real generation backend. `None` selects the in-process mock.
    pub generation_backend_url: Option<String>,
    pub mock_generate_delay: Duration,
    pub mock_lookup_delay: Duration,
    pub service_timeout: Duration,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: parse_env("PORT", 8080u16)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            generation_backend_url: optional_env("GENERATION_BACKEND_URL"),
            mock_generate_delay: Duration::from_millis(parse_env("MOCK_GENERATE_DELAY_MS", 1500u64)?),
            mock_lookup_delay: Duration::from_millis(parse_env("MOCK_LOOKUP_DELAY_MS", 1000u64)?),
            service_timeout: Duration::from_secs(parse_env("SERVICE_TIMEOUT_SECS", 30u64)?),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 10 * 1024 * 1024usize)?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            generation_backend_url: None,
            mock_generate_delay: Duration::from_millis(1500),
            mock_lookup_delay: Duration::from_millis(1000),
            service_timeout: Duration::from_secs(30),
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        None => Ok(default),
    }
}
