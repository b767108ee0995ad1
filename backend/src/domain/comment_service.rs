//! Comment workflow: add, edit and delete comments on posts.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info};

use crate::domain::ports::{
    AddCommentRequest, CommentCommand, CommentRepository, DeleteCommentRequest,
    EditCommentRequest, PostRepository,
};
use crate::domain::{
    Comment, CommentId, CommentOutcome, CommentText, Error, NewComment, PostId, RedirectTarget,
    UserId, policy,
};

/// Service implementing [`CommentCommand`].
#[derive(Clone)]
pub struct CommentService<P, C> {
    posts: Arc<P>,
    comments: Arc<C>,
    clock: Arc<dyn Clock>,
}

impl<P, C> CommentService<P, C> {
    /// Create a comment service over the given repositories.
    pub fn new(posts: Arc<P>, comments: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self {
            posts,
            comments,
            clock,
        }
    }
}

fn comment_not_found(comment_id: CommentId) -> Error {
    Error::not_found(format!("comment {comment_id} not found"))
}

impl<P, C> CommentService<P, C>
where
    P: PostRepository,
    C: CommentRepository,
{
    /// Load a comment the actor owns, checking it belongs to `post_id`.
    async fn owned_comment(
        &self,
        post_id: PostId,
        comment_id: CommentId,
        actor: &UserId,
        action: &'static str,
    ) -> Result<Comment, Error> {
        let comment = self
            .comments
            .find_by_id(comment_id)
            .await?
            .filter(|comment| comment.post_id == post_id)
            .ok_or_else(|| comment_not_found(comment_id))?;
        if !policy::can_mutate(&comment, actor) {
            info!(comment_id = %comment_id, actor = %actor, action, "comment mutation forbidden");
            return Err(Error::forbidden(format!(
                "only the author may {action} this comment"
            )));
        }
        Ok(comment)
    }
}

#[async_trait]
impl<P, C> CommentCommand for CommentService<P, C>
where
    P: PostRepository,
    C: CommentRepository,
{
    async fn add_comment(&self, request: AddCommentRequest) -> Result<CommentOutcome, Error> {
        if self.posts.find_by_id(request.post_id).await?.is_none() {
            return Err(Error::not_found(format!(
                "post {} not found",
                request.post_id
            )));
        }
        let text = CommentText::new(request.text)?;
        let comment = self
            .comments
            .insert(&NewComment {
                post_id: request.post_id,
                author: request.author,
                text,
                created_at: self.clock.utc(),
            })
            .await?;
        debug!(comment_id = %comment.id, post_id = %comment.post_id, "comment added");
        Ok(CommentOutcome {
            redirect: RedirectTarget::PostDetail(comment.post_id),
            comment,
        })
    }

    async fn edit_comment(&self, request: EditCommentRequest) -> Result<CommentOutcome, Error> {
        let comment = self
            .owned_comment(request.post_id, request.comment_id, &request.actor, "edit")
            .await?;
        let text = CommentText::new(request.text?)?;
        let updated = self
            .comments
            .update_text(comment.id, &text)
            .await?
            .ok_or_else(|| comment_not_found(comment.id))?;
        debug!(comment_id = %updated.id, "comment edited");
        Ok(CommentOutcome {
            redirect: RedirectTarget::PostDetail(updated.post_id),
            comment: updated,
        })
    }

    async fn delete_comment(
        &self,
        request: DeleteCommentRequest,
    ) -> Result<RedirectTarget, Error> {
        let comment = self
            .owned_comment(request.post_id, request.comment_id, &request.actor, "delete")
            .await?;
        if !self.comments.delete(comment.id).await? {
            return Err(comment_not_found(comment.id));
        }
        debug!(comment_id = %comment.id, "comment deleted");
        Ok(RedirectTarget::PostDetail(comment.post_id))
    }
}
