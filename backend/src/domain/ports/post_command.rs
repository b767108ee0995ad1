//! Driving port for authoring posts.

use async_trait::async_trait;

use crate::domain::{CreatedPost, Error, MutationOutcome, PostDraft, PostId, UserId};

/// Request to publish or schedule a new post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePostRequest {
    pub author: UserId,
    pub draft: PostDraft,
}

/// Request to replace the content of an existing post.
#[derive(Debug, Clone, PartialEq)]
pub struct EditPostRequest {
    pub post_id: PostId,
    pub actor: UserId,
    /// Replacement content as submitted. A rejected submission is only
    /// reported once the actor is known to own the post.
    pub draft: Result<PostDraft, Error>,
}

/// Write-side use cases for posts.
///
/// Edits and deletes by anyone but the author are reported as
/// [`MutationOutcome::Denied`], never as errors.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostCommand: Send + Sync {
    async fn create_post(&self, request: CreatePostRequest) -> Result<CreatedPost, Error>;

    async fn edit_post(&self, request: EditPostRequest) -> Result<MutationOutcome, Error>;

    async fn delete_post(&self, post_id: PostId, actor: UserId)
    -> Result<MutationOutcome, Error>;
}
