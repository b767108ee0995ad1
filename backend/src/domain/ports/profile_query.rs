//! Driving port for profile pages.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{Error, PostListing, Profile, UserId, Username};

/// Read-side profile use cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileQuery: Send + Sync {
    /// Public profile page: the user plus a page of their posts.
    ///
    /// The returned listing's subject is always
    /// [`ListingSubject::Author`](crate::domain::ListingSubject::Author).
    async fn get_profile(
        &self,
        username: Username,
        viewer: Option<UserId>,
        page: PageRequest,
    ) -> Result<PostListing, Error>;

    /// Editable profile of `actor`, created from the account when missing.
    async fn fetch_own_profile(&self, actor: UserId) -> Result<Profile, Error>;
}
