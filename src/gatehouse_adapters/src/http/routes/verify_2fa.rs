use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use serde_json::json;

use gatehouse_application::VerifyTwoFaUseCase;
use gatehouse_core::{SmsClient, UserId, UserStore, VerificationCode, VerificationCodeStore};

use crate::auth::session_cookie::build_refresh_cookie;
use crate::http::{error::ApiError, state::AppState, validation::FieldErrors};

#[derive(Deserialize)]
pub struct Verify2FaRequest {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub code: String,
}

/// Step 2 of 2. A correct code consumes itself and mints the session: an
/// access token in the body and a refresh token in the session cookie.
#[tracing::instrument(name = "Verify 2FA", skip_all)]
pub async fn verify_2fa<U, V, S>(
    State(state): State<AppState<U, V, S>>,
    jar: CookieJar,
    Json(request): Json<Verify2FaRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + 'static,
    V: VerificationCodeStore + 'static,
    S: SmsClient + 'static,
{
    let mut errors = FieldErrors::new();
    let user_id = errors.check("userId", UserId::parse(&request.user_id));
    let code = errors.check("code", VerificationCode::parse(request.code));

    let (Some(user_id), Some(code)) = (user_id, code) else {
        return Err(errors.into_error());
    };

    let use_case = VerifyTwoFaUseCase::new(state.code_store.clone());
    use_case.execute(user_id, code).await?;

    let access_token = state.tokens.sign_access(&user_id)?;
    let refresh_token = state.tokens.sign_refresh(&user_id)?;

    let updated_jar = jar.add(build_refresh_cookie(
        refresh_token.clone(),
        &state.cookie_settings,
    ));

    Ok((
        StatusCode::OK,
        updated_jar,
        Json(json!({
            "message": "2FA verified",
            "accessToken": access_token,
            "refreshToken": refresh_token,
        })),
    ))
}
