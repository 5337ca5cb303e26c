//! Fixed-window rate limiting per client address.

use crate::{config::RateLimitConfig, http::error::ApiError};
use axum::{
    extract::{ConnectInfo, Request, State},
    http::{HeaderMap, HeaderName, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{Arc, Mutex, PoisonError},
    time::{Duration, Instant},
};

const PRUNE_THRESHOLD: usize = 1024;

/// Outcome of counting one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    /// The request fits in the client's current window.
    Allowed {
        /// Requests allowed per window.
        limit: u32,
        /// Requests left in the current window.
        remaining: u32,
        /// Time until the current window closes.
        reset_in: Duration,
    },
    /// The client has used up its window.
    Limited {
        /// Time until the current window closes.
        retry_after: Duration,
    },
}

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

/// Per-client fixed-window request counter.
///
/// Counts live in process memory, so each server instance limits
/// independently.
#[derive(Debug)]
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    windows: Mutex<HashMap<String, Window>>,
}

impl RateLimiter {
    /// Creates a limiter allowing `max_requests` per `window`.
    #[must_use]
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Creates a limiter from configuration.
    #[must_use]
    pub fn from_config(config: &RateLimitConfig) -> Self {
        Self::new(config.max_requests, config.window())
    }

    /// Counts one request from `client` at `now`.
    #[must_use]
    pub fn check(&self, client: &str, now: Instant) -> RateDecision {
        let mut windows = self
            .windows
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if windows.len() > PRUNE_THRESHOLD {
            let window = self.window;
            windows.retain(|_, tracked| now.saturating_duration_since(tracked.started) < window);
        }

        let entry = windows.entry(client.to_owned()).or_insert(Window {
            started: now,
            count: 0,
        });
        if now.saturating_duration_since(entry.started) >= self.window {
            *entry = Window {
                started: now,
                count: 0,
            };
        }

        let reset_in = self
            .window
            .saturating_sub(now.saturating_duration_since(entry.started));
        if entry.count >= self.max_requests {
            return RateDecision::Limited {
                retry_after: reset_in,
            };
        }

        entry.count += 1;
        RateDecision::Allowed {
            limit: self.max_requests,
            remaining: self.max_requests - entry.count,
            reset_in,
        }
    }
}

/// Identifies the client: first `X-Forwarded-For` hop, then `X-Real-IP`,
/// then the peer address.
#[must_use]
pub fn client_address(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    let header_value = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
    };

    if let Some(first) = header_value("x-forwarded-for")
        .and_then(|forwarded| forwarded.split(',').next())
        .map(str::trim)
        .filter(|first| !first.is_empty())
    {
        return first.to_owned();
    }
    if let Some(real_ip) = header_value("x-real-ip") {
        return real_ip.to_owned();
    }
    peer.map_or_else(|| "unknown".to_owned(), |addr| addr.ip().to_string())
}

/// Rejects clients over budget with 429 and annotates passing responses
/// with `X-RateLimit-*` headers.
pub async fn rate_limit(
    State(limiter): State<Arc<RateLimiter>>,
    request: Request,
    next: Next,
) -> Response {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0);
    let client = client_address(request.headers(), peer);

    match limiter.check(&client, Instant::now()) {
        RateDecision::Limited { retry_after } => {
            tracing::warn!(
                client = %client,
                method = %request.method(),
                uri = %request.uri(),
                "rate limit exceeded"
            );
            ApiError::RateLimited {
                retry_after: ceil_secs(retry_after),
            }
            .into_response()
        }
        RateDecision::Allowed {
            limit,
            remaining,
            reset_in,
        } => {
            let mut response = next.run(request).await;
            let reset_at = chrono::Utc::now().timestamp().saturating_add(
                i64::try_from(ceil_secs(reset_in)).unwrap_or(i64::MAX),
            );
            let headers = response.headers_mut();
            headers.insert(
                HeaderName::from_static("x-ratelimit-limit"),
                HeaderValue::from(limit),
            );
            headers.insert(
                HeaderName::from_static("x-ratelimit-remaining"),
                HeaderValue::from(remaining),
            );
            headers.insert(
                HeaderName::from_static("x-ratelimit-reset"),
                HeaderValue::from(reset_at),
            );
            response
        }
    }
}

fn ceil_secs(duration: Duration) -> u64 {
    let secs = duration.as_secs();
    if duration.subsec_nanos() > 0 {
        secs + 1
    } else {
        secs.max(1)
    }
}
