use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;
use serde_json::json;

use gatehouse_core::{SmsClient, UserStore, VerificationCodeStore};

use crate::auth::session_cookie::{
    REFRESH_COOKIE_NAME, build_refresh_cookie, clear_refresh_cookie,
};
use crate::http::{error::ApiError, state::AppState};

/// Rotates the session. The refresh token travels only in the cookie; a
/// missing cookie and a bad token are reported differently on purpose so the
/// client can tell "log in again" from "session was rejected". Either way a
/// rejected session evicts the cookie, so the client stops resubmitting it.
#[tracing::instrument(name = "Refresh token", skip_all)]
pub async fn refresh_token<U, V, S>(
    State(state): State<AppState<U, V, S>>,
    jar: CookieJar,
) -> Result<Response, ApiError>
where
    U: UserStore + 'static,
    V: VerificationCodeStore + 'static,
    S: SmsClient + 'static,
{
    let verified = match jar.get(REFRESH_COOKIE_NAME) {
        None => Err(ApiError::MissingSession),
        Some(cookie) => state
            .tokens
            .verify_refresh(cookie.value())
            .map_err(|_| ApiError::InvalidSession),
    };

    let user_id = match verified {
        Ok(user_id) => user_id,
        Err(err) => {
            let cleared = jar.add(clear_refresh_cookie(&state.cookie_settings));
            return Ok((cleared, err).into_response());
        }
    };

    let access_token = state.tokens.sign_access(&user_id)?;
    let refresh_token = state.tokens.sign_refresh(&user_id)?;

    let updated_jar = jar.add(build_refresh_cookie(refresh_token, &state.cookie_settings));

    Ok((
        StatusCode::OK,
        updated_jar,
        Json(json!({ "accessToken": access_token })),
    )
        .into_response())
}
