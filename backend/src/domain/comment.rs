//! Reader comments attached to posts.

use std::fmt;

use chrono::{DateTime, Utc};
use serde_json::json;

use super::macros::define_entity_id;
use super::{Error, PostId, UserId, Username};

define_entity_id!(
    /// Surrogate key of a [`Comment`].
    CommentId
);

/// Number of characters of a comment shown by its `Display` form.
const DISPLAY_PREVIEW_CHARS: usize = 40;

/// Comment left by an authenticated user on a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: CommentId,
    pub post_id: PostId,
    pub text: String,
    pub author: UserId,
    pub author_username: Username,
    pub created_at: DateTime<Utc>,
}

impl fmt::Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let preview: String = self.text.chars().take(DISPLAY_PREVIEW_CHARS).collect();
        f.write_str(&preview)
    }
}

/// Validation failure for comment bodies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentValidationError {
    EmptyText,
}

impl fmt::Display for CommentValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyText => write!(f, "comment text must not be empty"),
        }
    }
}

impl std::error::Error for CommentValidationError {}

impl From<CommentValidationError> for Error {
    fn from(err: CommentValidationError) -> Self {
        Error::invalid_request(err.to_string())
            .with_details(json!({ "field": "text", "code": "empty_text" }))
    }
}

/// Non-blank comment body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentText(String);

impl CommentText {
    /// Validate a comment body, keeping the caller's formatting.
    pub fn new(text: impl Into<String>) -> Result<Self, CommentValidationError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(CommentValidationError::EmptyText);
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Comment ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub post_id: PostId,
    pub author: UserId,
    pub text: CommentText,
    pub created_at: DateTime<Utc>,
}
