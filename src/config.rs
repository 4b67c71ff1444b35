use std::{env, net::SocketAddr, time::Duration};

use anyhow::{Context, Result};

#[derive(Clone, Debug)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub database_path: String,
    pub request_timeout: Duration,
    pub rate_limit_max_requests: u32,
    pub rate_limit_window: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let listen_addr = env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .with_context(|| "Invalid LISTEN_ADDR")?;

        let database_path = shellexpand::tilde(
            &env::var("DATABASE_PATH").unwrap_or_else(|_| "portfolio.db".to_string()),
        )
        .into_owned();

        let timeout_ms = env::var("REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".to_string())
            .parse::<u64>()
            .with_context(|| "Invalid REQUEST_TIMEOUT_MS")?;

        let rate_limit_max_requests = env::var("RATE_LIMIT_MAX_REQUESTS")
            .unwrap_or_else(|_| "60".to_string())
            .parse::<u32>()
            .with_context(|| "Invalid RATE_LIMIT_MAX_REQUESTS")?;

        let rate_limit_window_secs = env::var("RATE_LIMIT_WINDOW_SECS")
            .unwrap_or_else(|_| "60".to_string())
            .parse::<u64>()
            .with_context(|| "Invalid RATE_LIMIT_WINDOW_SECS")?;

        Ok(Self {
            listen_addr,
            database_path,
            request_timeout: Duration::from_millis(timeout_ms),
            rate_limit_max_requests,
            rate_limit_window: Duration::from_secs(rate_limit_window_secs),
        })
    }
}
