use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use secrecy::Secret;
use serde::Deserialize;
use serde_json::json;

use gatehouse_application::LoginUseCase;
use gatehouse_core::{Email, Password, SmsClient, UserStore, VerificationCodeStore};

use crate::http::{error::ApiError, state::AppState, validation::FieldErrors};

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: Secret<String>,
    pub password: Secret<String>,
}

/// Step 1 of 2. A successful response confirms only that a code was sent;
/// no tokens are issued until the code comes back at verify-2fa.
#[tracing::instrument(name = "Login", skip_all)]
pub async fn login<U, V, S>(
    State(state): State<AppState<U, V, S>>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + 'static,
    V: VerificationCodeStore + 'static,
    S: SmsClient + 'static,
{
    let mut errors = FieldErrors::new();
    let email = errors.check("email", Email::try_from(request.email));
    let password = errors.check("password", Password::parse(request.password));

    let (Some(email), Some(password)) = (email, password) else {
        return Err(errors.into_error());
    };

    let use_case = LoginUseCase::new(
        state.user_store.clone(),
        state.code_store.clone(),
        state.sms_client.clone(),
    );
    let user_id = use_case.execute(email, password).await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "message": "Verification code sent via SMS",
            "userId": user_id.to_string(),
        })),
    ))
}
