//! Listing pipeline vocabulary: scopes, store queries and listing results.

use std::num::NonZeroU32;

use chrono::{DateTime, Utc};
use pagination::{Page, PageRequest};

use super::{Category, CategoryId, CategorySlug, Post, PostSummary, User, UserId, Username, policy};

/// Number of posts shown per listing page.
pub const POSTS_PER_PAGE: NonZeroU32 = NonZeroU32::MIN.saturating_add(9);

/// Selection criterion for a post listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostScope {
    /// Site index.
    All,
    /// Posts written by one user (profile page).
    ByAuthor(Username),
    /// Posts filed under one category.
    ByCategory(CategorySlug),
}

/// Which posts a store query may return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityRule {
    /// Only posts readers may see at `now`.
    Public { now: DateTime<Utc> },
    /// Every matching post; used when authors browse their own posts.
    Unrestricted,
}

impl VisibilityRule {
    /// Whether `post` passes the rule.
    #[must_use]
    pub fn admits(&self, post: &Post) -> bool {
        match self {
            Self::Public { now } => policy::is_publicly_visible(post, *now),
            Self::Unrestricted => true,
        }
    }
}

/// Filtered, ordered and paginated post query handed to the store.
///
/// Stores return matches ordered by publication date, newest first, with ties
/// broken by descending id so paging stays stable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostListQuery {
    /// Restrict to posts written by this user.
    pub author: Option<UserId>,
    /// Restrict to posts filed under this category.
    pub category: Option<CategoryId>,
    /// Which posts the viewer may see.
    pub visibility: VisibilityRule,
    /// Page to cut from the ordered matches.
    pub page: PageRequest,
}

impl PostListQuery {
    /// Whether `post` matches the filters and visibility rule.
    #[must_use]
    pub fn matches(&self, post: &Post) -> bool {
        self.author.is_none_or(|author| post.author == author)
            && self
                .category
                .is_none_or(|id| post.category.as_ref().is_some_and(|c| c.id == id))
            && self.visibility.admits(post)
    }
}

/// One page of store results plus the total number of matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostSlice {
    /// Summaries on the requested page, already ordered.
    pub items: Vec<PostSummary>,
    /// Matches across all pages.
    pub total: u64,
}

/// What a listing is about; used for page headings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingSubject {
    Site,
    Author(User),
    Category(Category),
}

/// A page of post summaries together with the listing's subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostListing {
    pub subject: ListingSubject,
    pub page: Page<PostSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_support::{category, fixed_now, post_by};
    use chrono::Duration;
    use rstest::rstest;

    #[rstest]
    fn page_size_is_ten() {
        assert_eq!(POSTS_PER_PAGE.get(), 10);
    }

    #[rstest]
    fn query_filters_by_category_and_visibility() {
        let now = fixed_now();
        let mut post = post_by(UserId::random(), now - Duration::hours(1));
        post.category = Some(category("news", true));
        let news = post.category.as_ref().map(|c| c.id);

        let query = PostListQuery {
            author: None,
            category: news,
            visibility: VisibilityRule::Public { now },
            page: PageRequest::first(POSTS_PER_PAGE),
        };
        assert!(query.matches(&post));

        post.category = None;
        assert!(!query.matches(&post));
    }

    #[rstest]
    fn unrestricted_rule_admits_drafts() {
        let now = fixed_now();
        let mut post = post_by(UserId::random(), now + Duration::days(2));
        post.is_published = false;
        assert!(VisibilityRule::Unrestricted.admits(&post));
        assert!(!VisibilityRule::Public { now }.admits(&post));
    }
}
