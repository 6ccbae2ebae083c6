pub mod auth;
pub mod config;
pub mod http;
pub mod persistence;
pub mod sms;

pub use auth::{
    session_cookie::{REFRESH_COOKIE_NAME, RefreshCookieSettings},
    token_service::{JwtTokenService, TokenError},
};
pub use persistence::{
    hashmap_user_store::HashMapUserStore,
    hashmap_verification_code_store::HashMapVerificationCodeStore,
    postgres_user_store::PostgresUserStore,
    redis_verification_code_store::RedisVerificationCodeStore,
};
pub use sms::{
    mock_sms_client::{MockSmsClient, RecordingSmsClient},
    twilio_sms_client::TwilioSmsClient,
};
