use std::{sync::Arc, time::Duration};

use color_eyre::eyre::Result;
use redis::Client;
use reqwest::Client as HttpClient;
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use tokio::sync::Mutex;

use gatehouse_adapters::{
    JwtTokenService, PostgresUserStore, RedisVerificationCodeStore, RefreshCookieSettings,
    TwilioSmsClient,
    config::Settings,
    http::state::AppState,
};
use gatehouse_service::{AuthService, RateLimits, telemetry::init_tracing};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    color_eyre::install().expect("Failed to install color_eyre");
    init_tracing().expect("Failed to initialize tracing");

    let settings = Settings::load()?;

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(settings.database.url.expose_secret())
        .await?;

    sqlx::migrate!().run(&pg_pool).await?;

    let redis_client = Client::open(settings.redis.url.clone())?;
    let redis_conn = Arc::new(Mutex::new(redis_client.get_connection()?));

    let user_store = PostgresUserStore::new(pg_pool);
    let code_store = RedisVerificationCodeStore::new(redis_conn, settings.auth.code_ttl_seconds);

    let http_client = HttpClient::builder()
        .timeout(Duration::from_millis(settings.sms.timeout_millis))
        .build()?;
    let sms_client = TwilioSmsClient::new(
        settings.sms.base_url.clone(),
        settings.sms.account_sid.clone(),
        settings.sms.auth_token.clone(),
        settings.sms.from_number.clone(),
        http_client,
    );

    let tokens = JwtTokenService::new(
        &settings.auth.access_secret,
        settings.auth.access_ttl_seconds,
        &settings.auth.refresh_secret,
        settings.auth.refresh_ttl_seconds,
    );
    let cookie_settings = RefreshCookieSettings {
        secure: settings.app.environment.cookies_require_https(),
        max_age_seconds: settings.auth.refresh_ttl_seconds,
    };

    let state = AppState::new(user_store, code_store, sms_client, tokens, cookie_settings);

    let limits = RateLimits {
        window: Duration::from_secs(settings.rate_limit.window_seconds),
        max_auth_attempts: settings.rate_limit.max_auth_attempts,
        max_refresh_attempts: settings.rate_limit.max_refresh_attempts,
        max_password_change_attempts: settings.rate_limit.max_password_change_attempts,
    };

    let listener = tokio::net::TcpListener::bind(&settings.app.address).await?;
    AuthService::new(state, limits).run(listener).await?;

    Ok(())
}
