use gatehouse_core::{
    SmsClient, UserId, UserStore, UserStoreError, VerificationCode, VerificationCodeStore,
    VerificationCodeStoreError,
};

/// Error types for the request-password-change use case
#[derive(Debug, thiserror::Error)]
pub enum RequestPasswordChangeError {
    #[error("User not found")]
    UserNotFound,
    #[error("User store error: {0}")]
    UserStoreError(UserStoreError),
    #[error("Code store error: {0}")]
    CodeStoreError(#[from] VerificationCodeStoreError),
    #[error("Failed to send SMS: {0}")]
    SmsError(String),
}

impl From<UserStoreError> for RequestPasswordChangeError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::UserNotFound => RequestPasswordChangeError::UserNotFound,
            other => RequestPasswordChangeError::UserStoreError(other),
        }
    }
}

/// Request-password-change use case - re-runs the login-style code issuance
/// for an already-authenticated user. The code itself never appears in any
/// response body, only in the SMS.
pub struct RequestPasswordChangeUseCase<U, V, S>
where
    U: UserStore,
    V: VerificationCodeStore,
    S: SmsClient,
{
    user_store: U,
    code_store: V,
    sms_client: S,
}

impl<U, V, S> RequestPasswordChangeUseCase<U, V, S>
where
    U: UserStore,
    V: VerificationCodeStore,
    S: SmsClient,
{
    pub fn new(user_store: U, code_store: V, sms_client: S) -> Self {
        Self {
            user_store,
            code_store,
            sms_client,
        }
    }

    #[tracing::instrument(name = "RequestPasswordChangeUseCase::execute", skip(self))]
    pub async fn execute(&self, user_id: UserId) -> Result<(), RequestPasswordChangeError> {
        let user = self.user_store.find_by_id(&user_id).await?;

        let code = VerificationCode::new();
        self.code_store.store_code(user.id(), code.clone()).await?;

        self.sms_client
            .send_sms(user.mobile(), &format!("Your login code is {}", code.as_str()))
            .await
            .map_err(RequestPasswordChangeError::SmsError)?;

        Ok(())
    }
}
