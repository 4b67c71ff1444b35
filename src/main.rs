use std::net::SocketAddr;
use std::sync::Arc;

use portfolio_ledger_api::{
    api::{AppState, app_router, rate_limit::RateLimiter},
    config::Config,
    db,
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;

    let db_connect_options = SqliteConnectOptions::new()
        .filename(&config.database_path)
        .create_if_missing(true);
    let connection = SqlitePool::connect_with(db_connect_options).await?;

    db::init::init_schema(&connection).await?;

    let state = Arc::new(AppState {
        pool: connection,
        rate_limiter: RateLimiter::new(config.rate_limit_max_requests, config.rate_limit_window),
    });

    let sweep_state = state.clone();
    let sweep_every = config.rate_limit_window;
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(sweep_every);
        loop {
            interval.tick().await;
            sweep_state.rate_limiter.sweep();
        }
    });

    let router = app_router(state, &config);

    tracing::info!("Listening on {}", config.listen_addr);
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
