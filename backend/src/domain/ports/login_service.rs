//! Driving port for session authentication.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, UserId};

/// Authenticate submitted credentials.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Return the account id when the credentials match.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;
}
