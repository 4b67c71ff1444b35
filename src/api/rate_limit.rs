use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::{ConnectInfo, Request, State, rejection::ExtensionRejection},
    middleware::Next,
    response::{IntoResponse, Response},
};
use dashmap::DashMap;

use super::AppState;
use super::error::ApiError;

#[derive(Debug)]
struct Window {
    count: u32,
    started: Instant,
}

/// Process-wide fixed-window counter keyed by client address. Non-authoritative:
/// a multi-instance deployment would move this behind a shared cache.
#[derive(Debug)]
pub struct RateLimiter {
    hits: DashMap<IpAddr, Window>,
    limit: u32,
    window: Duration,
}

impl RateLimiter {
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            hits: DashMap::new(),
            limit,
            window,
        }
    }

    /// Counts one hit; false once the caller is over the ceiling for the
    /// current window.
    pub fn check(&self, addr: IpAddr) -> bool {
        let now = Instant::now();
        let mut entry = self.hits.entry(addr).or_insert_with(|| Window {
            count: 0,
            started: now,
        });
        if now.duration_since(entry.started) >= self.window {
            entry.count = 0;
            entry.started = now;
        }
        entry.count += 1;
        entry.count <= self.limit
    }

    /// Drops expired windows; run periodically so idle clients do not pile up.
    pub fn sweep(&self) {
        let now = Instant::now();
        self.hits
            .retain(|_, window| now.duration_since(window.started) < self.window);
    }

    pub fn tracked_clients(&self) -> usize {
        self.hits.len()
    }
}

pub async fn rate_limit_middleware(
    State(state): State<Arc<AppState>>,
    connect_info: Result<ConnectInfo<SocketAddr>, ExtensionRejection>,
    request: Request,
    next: Next,
) -> Response {
    if let Ok(ConnectInfo(addr)) = connect_info {
        if !state.rate_limiter.check(addr.ip()) {
            tracing::warn!("rate limit exceeded for {}", addr.ip());
            return ApiError::TooManyRequests.into_response();
        }
    }
    next.run(request).await
}
