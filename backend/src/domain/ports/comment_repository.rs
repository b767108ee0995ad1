//! Driven port for comment persistence.

use async_trait::async_trait;

use crate::domain::{Comment, CommentId, CommentText, NewComment, PostId};

use super::StoreError;

/// Entity Store access for comments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Comments of one post ordered by creation time, oldest first.
    async fn list_for_post(&self, post_id: PostId) -> Result<Vec<Comment>, StoreError>;

    async fn find_by_id(&self, id: CommentId) -> Result<Option<Comment>, StoreError>;

    async fn insert(&self, comment: &NewComment) -> Result<Comment, StoreError>;

    /// Replace a comment's text; `None` when it vanished.
    async fn update_text(
        &self,
        id: CommentId,
        text: &CommentText,
    ) -> Result<Option<Comment>, StoreError>;

    /// Delete a comment; `false` when nothing was deleted.
    async fn delete(&self, id: CommentId) -> Result<bool, StoreError>;
}
