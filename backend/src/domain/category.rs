//! Post categories addressed by slug.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::macros::define_entity_id;

define_entity_id!(
    /// Surrogate key of a [`Category`].
    CategoryId
);

/// Validation errors for category slugs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlugValidationError {
    Empty,
    InvalidCharacters,
}

impl fmt::Display for SlugValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "slug must not be empty"),
            Self::InvalidCharacters => write!(
                f,
                "slug may only contain latin letters, digits, hyphens and underscores",
            ),
        }
    }
}

impl std::error::Error for SlugValidationError {}

/// URL identifier of a category.
///
/// # Examples
/// ```
/// use blog_backend::domain::CategorySlug;
///
/// assert!(CategorySlug::new("travel_2024").is_ok());
/// assert!(CategorySlug::new("путешествия").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CategorySlug(String);

impl CategorySlug {
    /// Validate and construct a slug.
    pub fn new(slug: impl Into<String>) -> Result<Self, SlugValidationError> {
        let slug = slug.into();
        if slug.is_empty() {
            return Err(SlugValidationError::Empty);
        }
        let allowed = |ch: char| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_';
        if !slug.chars().all(allowed) {
            return Err(SlugValidationError::InvalidCharacters);
        }
        Ok(Self(slug))
    }

    /// Borrow the slug text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategorySlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<CategorySlug> for String {
    fn from(value: CategorySlug) -> Self {
        value.0
    }
}

impl TryFrom<String> for CategorySlug {
    type Error = SlugValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Thematic grouping of posts. Unpublished categories hide their posts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub title: String,
    pub description: String,
    pub slug: CategorySlug,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}
