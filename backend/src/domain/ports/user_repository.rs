//! Driven port for user identities, credentials and profiles.

use async_trait::async_trait;

use crate::domain::{Profile, StoredCredentials, User, UserId, Username};

use super::StoreError;

/// Entity Store access for accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, StoreError>;

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, StoreError>;

    /// Credential digest for the account named `username`.
    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<StoredCredentials>, StoreError>;

    async fn find_profile(&self, user_id: &UserId) -> Result<Option<Profile>, StoreError>;

    /// Insert or update a profile and copy its fields onto the identity
    /// record atomically. A taken username yields [`StoreError::Conflict`].
    async fn save_profile(&self, profile: &Profile) -> Result<(), StoreError>;
}
