pub mod error;
pub mod identity;
pub mod portfolio;
pub mod rate_limit;

use std::sync::Arc;

use axum::{Router, middleware, routing::get};
use sqlx::{Pool, Sqlite};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::Config;
use rate_limit::RateLimiter;

pub struct AppState {
    pub pool: Pool<Sqlite>,
    pub rate_limiter: RateLimiter,
}

async fn healthz() -> &'static str {
    "ok"
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let api_routes = Router::new()
        .route(
            "/portfolio",
            get(portfolio::list_portfolio)
                .post(portfolio::add_transaction)
                .delete(portfolio::remove_transaction),
        )
        .route("/portfolio/holdings", get(portfolio::get_holdings))
        .route("/portfolio/dividends", get(portfolio::get_monthly_dividends))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit::rate_limit_middleware,
        ));

    Router::new()
        .route("/healthz", get(healthz))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
