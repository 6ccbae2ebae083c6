use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use secrecy::Secret;
use serde::Deserialize;
use serde_json::json;

use gatehouse_application::RegisterUseCase;
use gatehouse_core::{
    Email, Mobile, NewUser, Password, SmsClient, UserName, UserStore, VerificationCodeStore,
};

use crate::http::{error::ApiError, state::AppState, validation::FieldErrors};

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: Secret<String>,
    pub mobile: Secret<String>,
    pub password: Secret<String>,
}

#[tracing::instrument(name = "Register", skip_all)]
pub async fn register<U, V, S>(
    State(state): State<AppState<U, V, S>>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + 'static,
    V: VerificationCodeStore + 'static,
    S: SmsClient + 'static,
{
    let mut errors = FieldErrors::new();
    let name = errors.check("name", UserName::parse(request.name));
    let email = errors.check("email", Email::try_from(request.email));
    let mobile = errors.check("mobile", Mobile::try_from(request.mobile));
    let password = errors.check("password", Password::parse_new(request.password));

    let (Some(name), Some(email), Some(mobile), Some(password)) = (name, email, mobile, password)
    else {
        return Err(errors.into_error());
    };

    let use_case = RegisterUseCase::new(state.user_store.clone());
    let user_id = use_case
        .execute(NewUser {
            name,
            email,
            mobile,
            password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "User registered successfully",
            "userId": user_id.to_string(),
        })),
    ))
}
