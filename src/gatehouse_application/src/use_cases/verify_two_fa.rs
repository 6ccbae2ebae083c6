use gatehouse_core::{UserId, VerificationCode, VerificationCodeStore, VerificationCodeStoreError};

/// Error types for the verify-2FA use case
#[derive(Debug, thiserror::Error)]
pub enum VerifyTwoFaError {
    /// Covers absent, expired, already-consumed and mismatched codes alike.
    #[error("Invalid or expired 2FA code")]
    InvalidOrExpiredCode,
    #[error("Code store error: {0}")]
    CodeStoreError(#[from] VerificationCodeStoreError),
}

/// Verify-2FA use case - step 2 of 2. Consuming the code is the sole point
/// where an authenticated session is established; the caller issues tokens
/// only after this succeeds.
pub struct VerifyTwoFaUseCase<V>
where
    V: VerificationCodeStore,
{
    code_store: V,
}

impl<V> VerifyTwoFaUseCase<V>
where
    V: VerificationCodeStore,
{
    pub fn new(code_store: V) -> Self {
        Self { code_store }
    }

    #[tracing::instrument(name = "VerifyTwoFaUseCase::execute", skip(self, code))]
    pub async fn execute(
        &self,
        user_id: UserId,
        code: VerificationCode,
    ) -> Result<(), VerifyTwoFaError> {
        let consumed = self.code_store.consume(&user_id, &code).await?;
        if !consumed {
            return Err(VerifyTwoFaError::InvalidOrExpiredCode);
        }
        Ok(())
    }
}
