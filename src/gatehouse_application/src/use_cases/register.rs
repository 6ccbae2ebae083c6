use gatehouse_core::{NewUser, UserId, UserStore, UserStoreError};

/// Error types for the register use case
#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("Email or mobile already in use")]
    DuplicateIdentity,
    #[error("User store error: {0}")]
    UserStoreError(UserStoreError),
}

impl From<UserStoreError> for RegisterError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::DuplicateIdentity => RegisterError::DuplicateIdentity,
            other => RegisterError::UserStoreError(other),
        }
    }
}

/// Register use case - creates a new identity record. No tokens are issued
/// at this stage.
pub struct RegisterUseCase<U>
where
    U: UserStore,
{
    user_store: U,
}

impl<U> RegisterUseCase<U>
where
    U: UserStore,
{
    pub fn new(user_store: U) -> Self {
        Self { user_store }
    }

    /// Check for an existing email-or-mobile match, then create the record.
    /// The store's uniqueness constraint backs the check under races.
    #[tracing::instrument(name = "RegisterUseCase::execute", skip_all)]
    pub async fn execute(&self, new_user: NewUser) -> Result<UserId, RegisterError> {
        let existing = self
            .user_store
            .find_by_email_or_mobile(&new_user.email, &new_user.mobile)
            .await?;
        if existing.is_some() {
            return Err(RegisterError::DuplicateIdentity);
        }

        let user = self.user_store.add_user(new_user).await?;
        Ok(*user.id())
    }
}
