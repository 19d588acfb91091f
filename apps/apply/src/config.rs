use anyhow::{Context, Result};

/// Runtime configuration. Everything has a default; the apply endpoint
/// itself is a constant in `submit` and is deliberately not configurable.
#[derive(Debug, Clone)]
pub struct Config {
    pub rust_log: String,
    pub submit_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            submit_timeout_secs: std::env::var("SUBMIT_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse::<u64>()
                .context("SUBMIT_TIMEOUT_SECS must be a number of seconds")?,
        })
    }
}
