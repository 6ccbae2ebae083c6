use secrecy::Secret;
use serde::Deserialize;

/// Runtime settings, loaded from `GATEHOUSE__`-prefixed environment
/// variables over built-in defaults. Secrets deserialize straight into
/// `Secret` so they never show up in debug output.
#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: AppSettings,
    pub auth: AuthSettings,
    pub database: DatabaseSettings,
    pub redis: RedisSettings,
    pub sms: SmsSettings,
    pub rate_limit: RateLimitSettings,
}

#[derive(Debug, Deserialize)]
pub struct AppSettings {
    pub address: String,
    pub environment: Environment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Deserialize)]
pub struct AuthSettings {
    pub access_secret: Secret<String>,
    pub access_ttl_seconds: i64,
    pub refresh_secret: Secret<String>,
    pub refresh_ttl_seconds: i64,
    pub code_ttl_seconds: u64,
}

#[derive(Debug, Deserialize)]
pub struct DatabaseSettings {
    pub url: Secret<String>,
}

#[derive(Debug, Deserialize)]
pub struct RedisSettings {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct SmsSettings {
    pub account_sid: String,
    pub auth_token: Secret<String>,
    pub from_number: String,
    pub base_url: String,
    pub timeout_millis: u64,
}

#[derive(Debug, Deserialize)]
pub struct RateLimitSettings {
    pub window_seconds: u64,
    pub max_auth_attempts: u32,
    pub max_refresh_attempts: u32,
    pub max_password_change_attempts: u32,
}

impl Settings {
    pub fn load() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .set_default("app.address", "0.0.0.0:3000")?
            .set_default("app.environment", "development")?
            .set_default("auth.access_ttl_seconds", 15_i64 * 60)?
            .set_default("auth.refresh_ttl_seconds", 7_i64 * 24 * 60 * 60)?
            .set_default("auth.code_ttl_seconds", 5_i64 * 60)?
            .set_default("sms.base_url", "https://api.twilio.com")?
            .set_default("sms.timeout_millis", 10_000_i64)?
            .set_default("rate_limit.window_seconds", 15_i64 * 60)?
            .set_default("rate_limit.max_auth_attempts", 5_i64)?
            .set_default("rate_limit.max_refresh_attempts", 5_i64)?
            .set_default("rate_limit.max_password_change_attempts", 3_i64)?
            .add_source(
                config::Environment::with_prefix("GATEHOUSE")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }
}

impl Environment {
    /// The refresh cookie only carries Secure outside local development.
    pub fn cookies_require_https(&self) -> bool {
        matches!(self, Environment::Production)
    }
}
