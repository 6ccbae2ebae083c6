use gatehouse_core::{
    Password, UserId, UserStore, UserStoreError, VerificationCode, VerificationCodeStore,
    VerificationCodeStoreError,
};

/// Error types for the change-password use case
#[derive(Debug, thiserror::Error)]
pub enum ChangePasswordError {
    #[error("Invalid or expired code")]
    InvalidOrExpiredCode,
    #[error("User not found")]
    UserNotFound,
    #[error("User store error: {0}")]
    UserStoreError(UserStoreError),
    #[error("Code store error: {0}")]
    CodeStoreError(#[from] VerificationCodeStoreError),
}

impl From<UserStoreError> for ChangePasswordError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::UserNotFound => ChangePasswordError::UserNotFound,
            other => ChangePasswordError::UserStoreError(other),
        }
    }
}

/// Change-password use case - consumes the re-verification code, then
/// re-hashes. Existing sessions stay valid until their own expiry.
pub struct ChangePasswordUseCase<U, V>
where
    U: UserStore,
    V: VerificationCodeStore,
{
    user_store: U,
    code_store: V,
}

impl<U, V> ChangePasswordUseCase<U, V>
where
    U: UserStore,
    V: VerificationCodeStore,
{
    pub fn new(user_store: U, code_store: V) -> Self {
        Self {
            user_store,
            code_store,
        }
    }

    #[tracing::instrument(name = "ChangePasswordUseCase::execute", skip(self, code, new_password))]
    pub async fn execute(
        &self,
        user_id: UserId,
        code: VerificationCode,
        new_password: Password,
    ) -> Result<(), ChangePasswordError> {
        let consumed = self.code_store.consume(&user_id, &code).await?;
        if !consumed {
            return Err(ChangePasswordError::InvalidOrExpiredCode);
        }

        self.user_store
            .set_new_password(&user_id, new_password)
            .await?;

        Ok(())
    }
}
