use gatehouse_core::{
    Email, Password, SmsClient, UserId, UserStore, UserStoreError, VerificationCode,
    VerificationCodeStore, VerificationCodeStoreError,
};

/// Error types for the login use case
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    /// Deliberately covers both unknown email and wrong password so the
    /// response cannot be used to enumerate accounts.
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("User store error: {0}")]
    UserStoreError(UserStoreError),
    #[error("Code store error: {0}")]
    CodeStoreError(#[from] VerificationCodeStoreError),
    #[error("Failed to send SMS: {0}")]
    SmsError(String),
}

impl From<UserStoreError> for LoginError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::UserNotFound | UserStoreError::IncorrectPassword => {
                LoginError::InvalidCredentials
            }
            other => LoginError::UserStoreError(other),
        }
    }
}

/// Login use case - step 1 of 2. Verifies credentials, then issues and
/// delivers a one-time code. The user is not authenticated until verify-2fa.
pub struct LoginUseCase<U, V, S>
where
    U: UserStore,
    V: VerificationCodeStore,
    S: SmsClient,
{
    user_store: U,
    code_store: V,
    sms_client: S,
}

impl<U, V, S> LoginUseCase<U, V, S>
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

    /// Authenticate and dispatch a verification code to the user's mobile.
    /// Returns the user id the client must echo back at verify-2fa.
    ///
    /// If delivery fails after the code was stored there is no rollback: the
    /// undelivered code simply ages out, and a retried login overwrites it.
    #[tracing::instrument(name = "LoginUseCase::execute", skip(self, password))]
    pub async fn execute(&self, email: Email, password: Password) -> Result<UserId, LoginError> {
        let user = self.user_store.authenticate(&email, &password).await?;

        let code = VerificationCode::new();
        self.code_store.store_code(user.id(), code.clone()).await?;

        self.sms_client
            .send_sms(user.mobile(), &format!("Your login code is {}", code.as_str()))
            .await
            .map_err(LoginError::SmsError)?;

        Ok(*user.id())
    }
}
