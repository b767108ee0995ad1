//! Driving port for profile edits.

use async_trait::async_trait;

use crate::domain::{Error, ProfileEdit, RedirectTarget, UserId, Username};

/// Request to change the profile addressed by `target`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditProfileRequest {
    pub actor: UserId,
    pub target: Username,
    pub edit: ProfileEdit,
}

/// Write-side profile use cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileCommand: Send + Sync {
    async fn edit_profile(&self, request: EditProfileRequest) -> Result<RedirectTarget, Error>;
}
