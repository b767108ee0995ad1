//! Blog posts and the drafts used to create or edit them.

use std::fmt;

use chrono::{DateTime, Utc};
use serde_json::json;

use super::macros::define_entity_id;
use super::{Category, CategoryId, Comment, Error, Location, LocationId, UserId, Username};

define_entity_id!(
    /// Surrogate key of a [`Post`].
    PostId
);

/// Maximum post title length in characters.
pub const POST_TITLE_MAX: usize = 256;

/// A published or scheduled article.
///
/// `category` and `location` are resolved references; either may be absent
/// because the post never had one or because it was deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub text: String,
    pub image: Option<String>,
    pub pub_date: DateTime<Utc>,
    pub is_published: bool,
    pub author: UserId,
    pub author_username: Username,
    pub location: Option<Location>,
    pub category: Option<Category>,
    pub created_at: DateTime<Utc>,
}

impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

/// A post annotated with the number of comments it has.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostSummary {
    pub post: Post,
    pub comment_count: u64,
}

/// A single post with its comments, oldest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDetail {
    pub summary: PostSummary,
    pub comments: Vec<Comment>,
}

/// Field-level failures when validating a post draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostValidationError {
    EmptyTitle,
    TitleTooLong { max: usize },
    EmptyText,
    EmptyImage,
}

impl PostValidationError {
    /// Request field the failure refers to.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyTitle | Self::TitleTooLong { .. } => "title",
            Self::EmptyText => "text",
            Self::EmptyImage => "image",
        }
    }

    /// Machine-readable failure code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyTitle => "empty_title",
            Self::TitleTooLong { .. } => "title_too_long",
            Self::EmptyText => "empty_text",
            Self::EmptyImage => "empty_image",
        }
    }
}

impl fmt::Display for PostValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::TitleTooLong { max } => write!(f, "title must be at most {max} characters"),
            Self::EmptyText => write!(f, "text must not be empty"),
            Self::EmptyImage => write!(f, "image reference must not be blank"),
        }
    }
}

impl std::error::Error for PostValidationError {}

impl From<PostValidationError> for Error {
    fn from(err: PostValidationError) -> Self {
        Error::invalid_request(err.to_string())
            .with_details(json!({ "field": err.field(), "code": err.code() }))
    }
}

/// Raw post fields as submitted by a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraftInput {
    pub title: String,
    pub text: String,
    pub image: Option<String>,
    pub pub_date: DateTime<Utc>,
    pub is_published: bool,
    pub location_id: Option<LocationId>,
    pub category_id: Option<CategoryId>,
}

/// Validated post content, ready to be stored.
///
/// # Examples
/// ```
/// use blog_backend::domain::{PostDraft, PostDraftInput};
/// use chrono::Utc;
///
/// let draft = PostDraft::try_from_input(PostDraftInput {
///     title: "Hello".into(),
///     text: "First post".into(),
///     image: None,
///     pub_date: Utc::now(),
///     is_published: true,
///     location_id: None,
///     category_id: None,
/// })
/// .unwrap();
/// assert_eq!(draft.title(), "Hello");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    title: String,
    text: String,
    image: Option<String>,
    pub_date: DateTime<Utc>,
    is_published: bool,
    location_id: Option<LocationId>,
    category_id: Option<CategoryId>,
}

impl PostDraft {
    /// Validate raw input into a draft.
    pub fn try_from_input(input: PostDraftInput) -> Result<Self, PostValidationError> {
        let title = input.title.trim().to_owned();
        if title.is_empty() {
            return Err(PostValidationError::EmptyTitle);
        }
        if title.chars().count() > POST_TITLE_MAX {
            return Err(PostValidationError::TitleTooLong {
                max: POST_TITLE_MAX,
            });
        }
        if input.text.trim().is_empty() {
            return Err(PostValidationError::EmptyText);
        }
        let image = match input.image {
            Some(image) if image.trim().is_empty() => {
                return Err(PostValidationError::EmptyImage);
            }
            other => other,
        };
        Ok(Self {
            title,
            text: input.text,
            image,
            pub_date: input.pub_date,
            is_published: input.is_published,
            location_id: input.location_id,
            category_id: input.category_id,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    pub fn pub_date(&self) -> DateTime<Utc> {
        self.pub_date
    }

    pub fn is_published(&self) -> bool {
        self.is_published
    }

    pub fn location_id(&self) -> Option<LocationId> {
        self.location_id
    }

    pub fn category_id(&self) -> Option<CategoryId> {
        self.category_id
    }
}

/// A draft bound to its author, as handed to the store for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub author: UserId,
    pub draft: PostDraft,
    pub created_at: DateTime<Utc>,
}
