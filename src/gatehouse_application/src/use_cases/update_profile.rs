use gatehouse_core::{ProfileUpdate, UserId, UserStore, UserStoreError};

/// Error types for the update-profile use case
#[derive(Debug, thiserror::Error)]
pub enum UpdateProfileError {
    #[error("Email or mobile already in use")]
    DuplicateIdentity,
    #[error("User not found")]
    UserNotFound,
    #[error("User store error: {0}")]
    UserStoreError(UserStoreError),
}

impl From<UserStoreError> for UpdateProfileError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::DuplicateIdentity => UpdateProfileError::DuplicateIdentity,
            UserStoreError::UserNotFound => UpdateProfileError::UserNotFound,
            other => UpdateProfileError::UserStoreError(other),
        }
    }
}

/// Update-profile use case. Only name and email are mutable; mobile is not
/// representable in `ProfileUpdate` and the HTTP layer rejects it upstream.
pub struct UpdateProfileUseCase<U>
where
    U: UserStore,
{
    user_store: U,
}

impl<U> UpdateProfileUseCase<U>
where
    U: UserStore,
{
    pub fn new(user_store: U) -> Self {
        Self { user_store }
    }

    #[tracing::instrument(name = "UpdateProfileUseCase::execute", skip(self, update))]
    pub async fn execute(
        &self,
        user_id: UserId,
        update: ProfileUpdate,
    ) -> Result<(), UpdateProfileError> {
        self.user_store.update_profile(&user_id, update).await?;
        Ok(())
    }
}
