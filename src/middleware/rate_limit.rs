use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::{
    config::Config,
    utils::{error_codes, error_to_api_response},
};

// Single-instance fixed-window counter, keyed by client IP.
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    counters: Mutex<HashMap<String, WindowState>>,
}

struct WindowState {
    count: u32,
    window_start: Instant,
}

const PRUNE_THRESHOLD: usize = 10_000;

impl RateLimiter {
    pub fn new(config: &Config) -> Self {
        Self {
            max_requests: config.rate_limit_requests,
            window: config.rate_limit_window(),
            counters: Mutex::new(HashMap::new()),
        }
    }

    pub fn window_secs(&self) -> u64 {
        self.window.as_secs()
    }

    /// Counts one request for `ip`, returns false once the window is full.
    pub fn check(&self, ip: &str) -> bool {
        let now = Instant::now();
        let mut counters = self.counters.lock().unwrap();

        if counters.len() > PRUNE_THRESHOLD {
            let window = self.window;
            counters.retain(|_, state| now.duration_since(state.window_start) < window);
        }

        let state = counters.entry(ip.to_string()).or_insert(WindowState {
            count: 0,
            window_start: now,
        });
        if now.duration_since(state.window_start) >= self.window {
            state.count = 0;
            state.window_start = now;
        }
        state.count += 1;
        state.count <= self.max_requests
    }
}

pub async fn rate_limit(
    State(limiter): State<Arc<RateLimiter>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let remote_ip = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ci| ci.0.ip().to_string());

    // Proxy headers first, socket address as the fallback.
    let ip = req
        .headers()
        .get("x-real-ip")
        .and_then(|h| h.to_str().ok())
        .or_else(|| {
            req.headers()
                .get("x-forwarded-for")
                .and_then(|h| h.to_str().ok())
                .and_then(|s| s.split(',').find(|ip| !ip.trim().is_empty()))
        })
        .or_else(|| remote_ip.as_deref())
        .unwrap_or("unknown")
        .trim()
        .to_string();

    if !limiter.check(&ip) {
        tracing::warn!("rate limit exceeded for {}", ip);
        return (
            StatusCode::OK,
            error_to_api_response::<()>(
                error_codes::RATE_LIMIT,
                format!(
                    "too many requests, retry in {} seconds",
                    limiter.window_secs()
                ),
            ),
        )
            .into_response();
    }

    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter(max_requests: u32, window_secs: u64) -> RateLimiter {
        RateLimiter {
            max_requests,
            window: Duration::from_secs(window_secs),
            counters: Mutex::new(HashMap::new()),
        }
    }

    #[test]
    fn test_allows_up_to_limit() {
        let limiter = limiter(3, 60);
        assert!(limiter.check("1.2.3.4"));
        assert!(limiter.check("1.2.3.4"));
        assert!(limiter.check("1.2.3.4"));
        assert!(!limiter.check("1.2.3.4"));
        assert!(!limiter.check("1.2.3.4"));
    }

    #[test]
    fn test_counters_are_per_ip() {
        let limiter = limiter(1, 60);
        assert!(limiter.check("1.2.3.4"));
        assert!(!limiter.check("1.2.3.4"));
        assert!(limiter.check("5.6.7.8"));
    }

    #[test]
    fn test_window_resets() {
        let limiter = limiter(1, 0);
        assert!(limiter.check("1.2.3.4"));
        // Zero-length window: the next request starts a fresh one.
        assert!(limiter.check("1.2.3.4"));
    }
}
