use std::collections::HashMap;

use axum::{Json, extract::State, http::HeaderMap, http::StatusCode, response::IntoResponse};
use secrecy::Secret;
use serde::Deserialize;
use serde_json::json;

use gatehouse_application::UpdateProfileUseCase;
use gatehouse_core::{
    Email, ProfileUpdate, SmsClient, UserName, UserStore, VerificationCodeStore,
};

use crate::auth::bearer::authenticated_user;
use crate::http::{error::ApiError, state::AppState, validation::FieldErrors};

#[derive(Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub email: Option<Secret<String>>,
    /// Anything beyond name and email lands here and fails the request.
    /// Mobile in particular must stay immutable: it is the 2FA channel.
    #[serde(flatten)]
    pub unknown: HashMap<String, serde_json::Value>,
}

#[tracing::instrument(name = "Update profile", skip_all)]
pub async fn update_profile<U, V, S>(
    State(state): State<AppState<U, V, S>>,
    headers: HeaderMap,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + 'static,
    V: VerificationCodeStore + 'static,
    S: SmsClient + 'static,
{
    let user_id = authenticated_user(&headers, &state.tokens)?;

    let mut errors = FieldErrors::new();

    if !request.unknown.is_empty() {
        errors.push("", "Only 'name' and 'email' can be updated.");
    }

    let name = match request.name {
        Some(name) => errors.check("name", UserName::parse(name)),
        None => None,
    };
    let email = match request.email {
        Some(email) => errors.check("email", Email::try_from(email)),
        None => None,
    };

    if !errors.is_empty() {
        return Err(errors.into_error());
    }

    let use_case = UpdateProfileUseCase::new(state.user_store.clone());
    use_case
        .execute(user_id, ProfileUpdate { name, email })
        .await?;

    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Profile updated successfully" })),
    ))
}
