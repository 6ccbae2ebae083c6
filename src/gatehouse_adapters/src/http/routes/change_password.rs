use axum::{Json, extract::State, http::HeaderMap, http::StatusCode, response::IntoResponse};
use secrecy::Secret;
use serde::Deserialize;
use serde_json::json;

use gatehouse_application::ChangePasswordUseCase;
use gatehouse_core::{
    Password, SmsClient, UserStore, VerificationCode, VerificationCodeStore,
};

use crate::auth::bearer::authenticated_user;
use crate::http::{error::ApiError, state::AppState, validation::FieldErrors};

#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    pub code: String,
    #[serde(rename = "newPassword")]
    pub new_password: Secret<String>,
}

/// Completes the change requested at request-password-change. Input is
/// validated before the code is consumed, so a rejected password does not
/// burn the code.
#[tracing::instrument(name = "Change password", skip_all)]
pub async fn change_password<U, V, S>(
    State(state): State<AppState<U, V, S>>,
    headers: HeaderMap,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + 'static,
    V: VerificationCodeStore + 'static,
    S: SmsClient + 'static,
{
    let user_id = authenticated_user(&headers, &state.tokens)?;

    let mut errors = FieldErrors::new();
    let code = errors.check("code", VerificationCode::parse(request.code));
    let new_password = errors.check("newPassword", Password::parse_new(request.new_password));

    let (Some(code), Some(new_password)) = (code, new_password) else {
        return Err(errors.into_error());
    };

    let use_case = ChangePasswordUseCase::new(state.user_store.clone(), state.code_store.clone());
    use_case.execute(user_id, code, new_password).await?;

    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Password updated successfully" })),
    ))
}
