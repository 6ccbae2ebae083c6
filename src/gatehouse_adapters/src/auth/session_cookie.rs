use axum_extra::extract::cookie::{Cookie, SameSite};

/// Cookie that carries the refresh token between `/verify-2fa` and
/// `/refresh-token`. It never reaches script on the client.
pub const REFRESH_COOKIE_NAME: &str = "refreshToken";

#[derive(Debug, Clone, Copy)]
pub struct RefreshCookieSettings {
    /// Secure is off in local development so the cookie survives plain http.
    pub secure: bool,
    pub max_age_seconds: i64,
}

pub fn build_refresh_cookie(
    token: String,
    settings: &RefreshCookieSettings,
) -> Cookie<'static> {
    Cookie::build((REFRESH_COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(settings.secure)
        .max_age(time::Duration::seconds(settings.max_age_seconds))
        .build()
}

/// Expired duplicate of the refresh cookie, used to evict it client-side.
pub fn clear_refresh_cookie(settings: &RefreshCookieSettings) -> Cookie<'static> {
    Cookie::build((REFRESH_COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(settings.secure)
        .max_age(time::Duration::ZERO)
        .build()
}
