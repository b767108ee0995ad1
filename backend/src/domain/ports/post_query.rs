//! Driving port for reading posts and their comments.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{Comment, Error, PostDetail, PostId, PostListing, PostScope, UserId};

/// Read-side use cases for posts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostQuery: Send + Sync {
    /// One page of posts in `scope` as seen by `viewer`.
    async fn list_posts(
        &self,
        scope: PostScope,
        viewer: Option<UserId>,
        page: PageRequest,
    ) -> Result<PostListing, Error>;

    /// A single visible post with its comments.
    async fn get_post(&self, post_id: PostId, viewer: Option<UserId>)
    -> Result<PostDetail, Error>;

    /// Comments of a visible post, oldest first.
    async fn list_comments(
        &self,
        post_id: PostId,
        viewer: Option<UserId>,
    ) -> Result<Vec<Comment>, Error>;
}
