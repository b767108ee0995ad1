//! Driven port for post persistence.

use async_trait::async_trait;

use crate::domain::{NewPost, Post, PostDraft, PostId, PostListQuery, PostSlice};

use super::StoreError;

/// Entity Store access for posts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Fetch one post with its resolved category, location and author name.
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, StoreError>;

    /// Run a filtered listing query, annotating each post with its comment
    /// count and returning the total number of matches.
    async fn list(&self, query: &PostListQuery) -> Result<PostSlice, StoreError>;

    /// Store a new post.
    async fn insert(&self, post: &NewPost) -> Result<Post, StoreError>;

    /// Replace the content of an existing post; `None` when it vanished.
    async fn update(&self, id: PostId, draft: &PostDraft) -> Result<Option<Post>, StoreError>;

    /// Delete a post and its comments; `false` when nothing was deleted.
    async fn delete(&self, id: PostId) -> Result<bool, StoreError>;
}
