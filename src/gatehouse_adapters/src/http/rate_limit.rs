use std::{
    net::SocketAddr,
    sync::Arc,
    time::{Duration, Instant},
};

use axum::{
    Json,
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use dashmap::DashMap;

use super::error::ErrorResponse;

struct Window {
    started_at: Instant,
    count: u32,
}

/// Fixed-window request limiter keyed by client address. Counting is
/// per-window, not sliding; a new window starts on the first request after
/// the previous one ages out.
pub struct FixedWindowLimiter {
    max: u32,
    window: Duration,
    message: &'static str,
    windows: Arc<DashMap<String, Window>>,
}

impl FixedWindowLimiter {
    pub fn new(max: u32, window: Duration, message: &'static str) -> Self {
        Self {
            max,
            window,
            message,
            windows: Arc::new(DashMap::new()),
        }
    }

    pub fn try_acquire(&self, client: &str) -> bool {
        let now = Instant::now();

        // First sighting of a client pays for sweeping aged-out windows, so
        // the map tracks active clients instead of every address ever seen.
        if !self.windows.contains_key(client) {
            self.windows
                .retain(|_, window| now.duration_since(window.started_at) < self.window);
        }

        let mut entry = self.windows.entry(client.to_string()).or_insert(Window {
            started_at: now,
            count: 0,
        });

        if now.duration_since(entry.started_at) >= self.window {
            entry.started_at = now;
            entry.count = 0;
        }

        if entry.count >= self.max {
            return false;
        }

        entry.count += 1;
        true
    }
}

/// Middleware entry point; mount with `middleware::from_fn_with_state`.
pub async fn enforce(
    State(limiter): State<Arc<FixedWindowLimiter>>,
    request: Request,
    next: Next,
) -> Response {
    let client = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    if !limiter.try_acquire(&client) {
        tracing::warn!(client = %client, "rate limit exceeded");
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(ErrorResponse::new(limiter.message.to_string(), None)),
        )
            .into_response();
    }

    next.run(request).await
}
