//! Rate limiting middleware.

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::{
    clock::DefaultClock, state::keyed::DefaultKeyedStateStore, Quota, RateLimiter,
};
use std::{net::SocketAddr, num::NonZeroU32, sync::Arc, time::Duration};

use crate::config::RateLimitConfig;
use crate::web::error::ApiError;

/// Body text of a rejected request.
pub const RATE_LIMITED: &str = "Too many email requests from this IP, please try again later.";

/// Rate limiter keyed by client IP.
pub type IpRateLimiter = RateLimiter<String, DefaultKeyedStateStore<String>, DefaultClock>;

/// State for rate limiting.
///
/// Each client may send a burst of `max_requests`; capacity is then
/// replenished one request every `window_secs / max_requests` seconds.
pub struct RateLimitState {
    limiter: IpRateLimiter,
    cleanup_interval: Duration,
}

impl RateLimitState {
    /// Create a new rate limit state.
    pub fn new(config: &RateLimitConfig) -> Self {
        let max = NonZeroU32::new(config.max_requests).unwrap_or(NonZeroU32::MIN);
        let window = Duration::from_secs(config.window_secs.max(1));
        let period = window / max.get();

        let quota = Quota::with_period(period)
            .unwrap_or_else(|| Quota::per_second(max))
            .allow_burst(max);

        Self {
            limiter: RateLimiter::keyed(quota),
            cleanup_interval: Duration::from_secs(config.cleanup_interval_secs.max(1)),
        }
    }

    /// Check if a request from `ip` is allowed, consuming one unit if so.
    pub fn check(&self, ip: &str) -> bool {
        self.limiter.check_key(&ip.to_string()).is_ok()
    }

    /// Drop keys whose limiter has fully replenished.
    pub fn cleanup(&self) {
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
    }

    /// Number of tracked client keys.
    pub fn len(&self) -> usize {
        self.limiter.len()
    }

    /// Whether no client is tracked.
    pub fn is_empty(&self) -> bool {
        self.limiter.is_empty()
    }

    /// Start a background task to periodically clean up old entries.
    pub fn start_cleanup_task(self: Arc<Self>) {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(self.cleanup_interval);
            interval.tick().await;
            loop {
                interval.tick().await;
                self.cleanup();
                tracing::debug!(clients = self.len(), "Rate limiter cleaned up");
            }
        });
    }
}

/// Extract client IP from request.
pub fn get_client_ip(req: &Request<Body>) -> String {
    // Reverse proxy first.
    if let Some(forwarded) = req
        .headers()
        .get("X-Forwarded-For")
        .and_then(|v| v.to_str().ok())
    {
        if let Some(ip) = forwarded.split(',').next().map(str::trim) {
            if !ip.is_empty() {
                return ip.to_string();
            }
        }
    }

    if let Some(real_ip) = req
        .headers()
        .get("X-Real-IP")
        .and_then(|v| v.to_str().ok())
    {
        let real_ip = real_ip.trim();
        if !real_ip.is_empty() {
            return real_ip.to_string();
        }
    }

    if let Some(ConnectInfo(addr)) = req.extensions().get::<ConnectInfo<SocketAddr>>() {
        return addr.ip().to_string();
    }

    "unknown".to_string()
}

/// Rate limiting middleware for the send endpoints.
pub async fn send_rate_limit(
    state: Arc<RateLimitState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let ip = get_client_ip(&req);

    if !state.check(&ip) {
        tracing::warn!(ip = %ip, path = %req.uri().path(), "Send rate limit exceeded");
        return ApiError::too_many_requests(RATE_LIMITED).into_response();
    }

    next.run(req).await
}
