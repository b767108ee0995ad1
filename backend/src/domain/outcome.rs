//! Redirect-style results of mutating operations.

use super::{Comment, Post, PostId, Username};

/// Page a client should navigate to after a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectTarget {
    /// Site index.
    Index,
    /// Detail view of one post.
    PostDetail(PostId),
    /// Profile page of one user.
    Profile(Username),
}

/// Result of a post edit or delete.
///
/// A denial is not an error: the caller is redirected exactly as on success.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum MutationOutcome {
    /// The actor owns the post and the change was stored.
    Applied(RedirectTarget),
    /// The actor is not the author; nothing changed.
    Denied(RedirectTarget),
}

impl MutationOutcome {
    /// Where the client goes next, regardless of outcome.
    #[must_use]
    pub fn redirect(&self) -> &RedirectTarget {
        match self {
            Self::Applied(target) | Self::Denied(target) => target,
        }
    }

    /// Whether the store was touched.
    #[must_use]
    pub fn was_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

/// A newly stored post and where to go next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedPost {
    pub post: Post,
    pub redirect: RedirectTarget,
}

/// A stored or updated comment and where to go next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentOutcome {
    pub comment: Comment,
    pub redirect: RedirectTarget,
}
