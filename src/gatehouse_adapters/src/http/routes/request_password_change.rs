use axum::{Json, extract::State, http::HeaderMap, http::StatusCode, response::IntoResponse};
use serde_json::json;

use gatehouse_application::RequestPasswordChangeUseCase;
use gatehouse_core::{SmsClient, UserStore, VerificationCodeStore};

use crate::auth::bearer::authenticated_user;
use crate::http::{error::ApiError, state::AppState};

/// Issues a fresh verification code to the caller's registered mobile. The
/// code itself never appears in the response.
#[tracing::instrument(name = "Request password change", skip_all)]
pub async fn request_password_change<U, V, S>(
    State(state): State<AppState<U, V, S>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + 'static,
    V: VerificationCodeStore + 'static,
    S: SmsClient + 'static,
{
    let user_id = authenticated_user(&headers, &state.tokens)?;

    let use_case = RequestPasswordChangeUseCase::new(
        state.user_store.clone(),
        state.code_store.clone(),
        state.sms_client.clone(),
    );
    use_case.execute(user_id).await?;

    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Verification code sent" })),
    ))
}
