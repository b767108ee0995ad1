//! Driving port for the comment workflow.

use async_trait::async_trait;

use crate::domain::{CommentId, CommentOutcome, Error, PostId, RedirectTarget, UserId};

/// Request to comment on a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddCommentRequest {
    pub post_id: PostId,
    pub author: UserId,
    pub text: String,
}

/// Request to change a comment's text.
#[derive(Debug, Clone, PartialEq)]
pub struct EditCommentRequest {
    pub post_id: PostId,
    pub comment_id: CommentId,
    pub actor: UserId,
    /// Replacement text as submitted, checked after ownership.
    pub text: Result<String, Error>,
}

/// Request to remove a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteCommentRequest {
    pub post_id: PostId,
    pub comment_id: CommentId,
    pub actor: UserId,
}

/// Comment use cases. Non-owners receive a forbidden error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentCommand: Send + Sync {
    async fn add_comment(&self, request: AddCommentRequest) -> Result<CommentOutcome, Error>;

    async fn edit_comment(&self, request: EditCommentRequest) -> Result<CommentOutcome, Error>;

    async fn delete_comment(&self, request: DeleteCommentRequest)
    -> Result<RedirectTarget, Error>;
}
