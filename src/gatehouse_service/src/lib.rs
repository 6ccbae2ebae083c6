use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::{
    Router, middleware,
    routing::{get, patch, post},
};
use tower_http::trace::TraceLayer;

use gatehouse_adapters::http::{
    rate_limit::{self, FixedWindowLimiter},
    routes::{
        change_password, login, refresh_token, register, request_password_change, update_profile,
        verify_2fa,
    },
    state::AppState,
};
use gatehouse_core::{SmsClient, UserStore, VerificationCodeStore};

pub mod telemetry;

use telemetry::{make_span_with_request_id, on_request, on_response};

/// Per-endpoint-class rate limits, enforced before any workflow logic runs.
#[derive(Debug, Clone, Copy)]
pub struct RateLimits {
    pub window: Duration,
    pub max_auth_attempts: u32,
    pub max_refresh_attempts: u32,
    pub max_password_change_attempts: u32,
}

impl Default for RateLimits {
    fn default() -> Self {
        Self {
            window: Duration::from_secs(15 * 60),
            max_auth_attempts: 5,
            max_refresh_attempts: 5,
            max_password_change_attempts: 3,
        }
    }
}

/// The assembled authentication service: all routes, rate limiting, and
/// request tracing over a shared state.
pub struct AuthService {
    router: Router,
}

impl AuthService {
    pub fn new<U, V, S>(state: AppState<U, V, S>, limits: RateLimits) -> Self
    where
        U: UserStore + 'static,
        V: VerificationCodeStore + 'static,
        S: SmsClient + 'static,
    {
        let auth_limiter = Arc::new(FixedWindowLimiter::new(
            limits.max_auth_attempts,
            limits.window,
            "Too many authentication attempts, please try again later",
        ));
        let refresh_limiter = Arc::new(FixedWindowLimiter::new(
            limits.max_refresh_attempts,
            limits.window,
            "Too many refresh attempts, please try again later",
        ));
        let password_limiter = Arc::new(FixedWindowLimiter::new(
            limits.max_password_change_attempts,
            limits.window,
            "Too many password change attempts, please try again later",
        ));

        let auth_routes = Router::new()
            .route("/register", post(register::<U, V, S>))
            .route("/login", post(login::<U, V, S>))
            .route("/verify-2fa", post(verify_2fa::<U, V, S>))
            .route_layer(middleware::from_fn_with_state(
                auth_limiter,
                rate_limit::enforce,
            ))
            .merge(
                Router::new()
                    .route("/refresh-token", post(refresh_token::<U, V, S>))
                    .route_layer(middleware::from_fn_with_state(
                        refresh_limiter,
                        rate_limit::enforce,
                    )),
            );

        let users_routes = Router::new()
            .route("/profile", patch(update_profile::<U, V, S>))
            .merge(
                Router::new()
                    .route(
                        "/request-password-change",
                        post(request_password_change::<U, V, S>),
                    )
                    .route("/change-password", patch(change_password::<U, V, S>))
                    .route_layer(middleware::from_fn_with_state(
                        password_limiter,
                        rate_limit::enforce,
                    )),
            );

        let router = Router::new()
            .nest("/api/auth", auth_routes)
            .nest("/api/users", users_routes)
            .route("/healthz", get(healthz))
            .with_state(state)
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(make_span_with_request_id)
                    .on_request(on_request)
                    .on_response(on_response),
            );

        Self { router }
    }

    pub fn router(self) -> Router {
        self.router
    }

    /// Serve until the listener closes. Connection info is attached so the
    /// rate limiter can key on the client address.
    pub async fn run(self, listener: tokio::net::TcpListener) -> Result<(), std::io::Error> {
        tracing::info!("listening on {}", listener.local_addr()?);
        axum::serve(
            listener,
            self.router
                .into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
    }
}

async fn healthz() -> &'static str {
    "ok"
}
