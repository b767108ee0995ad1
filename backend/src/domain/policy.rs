//! Visibility and ownership rules for posts and comments.
//!
//! Both predicates are pure; services call them explicitly at the top of every
//! read or mutation rather than relying on layered guards.

use chrono::{DateTime, Utc};

use super::{Comment, Post, UserId};

/// Entities with a single owning author.
pub trait Owned {
    /// Author allowed to mutate the entity.
    fn owner(&self) -> &UserId;
}

impl Owned for Post {
    fn owner(&self) -> &UserId {
        &self.author
    }
}

impl Owned for Comment {
    fn owner(&self) -> &UserId {
        &self.author
    }
}

/// Whether `post` may be shown to anonymous readers at `now`.
///
/// The post must be published, its category (if any) must be published, and
/// its publication date must not be in the future.
#[must_use]
pub fn is_publicly_visible(post: &Post, now: DateTime<Utc>) -> bool {
    post.is_published
        && post.category.as_ref().is_none_or(|category| category.is_published)
        && post.pub_date <= now
}

/// Whether `viewer` may see `post` at `now`. Authors always see their posts.
///
/// # Examples
/// ```no_run
/// # use blog_backend::domain::{policy, Post, UserId};
/// # fn demo(post: &Post, stranger: &UserId) {
/// let now = chrono::Utc::now();
/// assert!(policy::is_visible(post, Some(&post.author), now));
/// let _ = policy::is_visible(post, Some(stranger), now);
/// # }
/// ```
#[must_use]
pub fn is_visible(post: &Post, viewer: Option<&UserId>, now: DateTime<Utc>) -> bool {
    viewer == Some(&post.author) || is_publicly_visible(post, now)
}

/// Whether `actor` may edit or delete `entity`.
#[must_use]
pub fn can_mutate<T: Owned + ?Sized>(entity: &T, actor: &UserId) -> bool {
    entity.owner() == actor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_support::{category, comment_on, post_by};
    use chrono::Duration;
    use rstest::{fixture, rstest};

    #[fixture]
    fn now() -> DateTime<Utc> {
        crate::domain::test_support::fixed_now()
    }

    #[fixture]
    fn author() -> UserId {
        UserId::random()
    }

    #[rstest]
    #[case::published_due(true, None, -1, true)]
    #[case::published_due_now(true, None, 0, true)]
    #[case::unpublished(false, None, -1, false)]
    #[case::scheduled(true, None, 1, false)]
    #[case::hidden_category(true, Some(false), -1, false)]
    #[case::visible_category(true, Some(true), -1, true)]
    fn public_visibility(
        now: DateTime<Utc>,
        author: UserId,
        #[case] is_published: bool,
        #[case] category_published: Option<bool>,
        #[case] days_from_now: i64,
        #[case] expected: bool,
    ) {
        let mut post = post_by(author, now + Duration::days(days_from_now));
        post.is_published = is_published;
        post.category = category_published.map(|published| category("news", published));

        assert_eq!(is_publicly_visible(&post, now), expected);
        assert_eq!(is_visible(&post, None, now), expected);
        assert_eq!(is_visible(&post, Some(&UserId::random()), now), expected);
    }

    #[rstest]
    fn author_sees_unpublished_scheduled_post_in_hidden_category(
        now: DateTime<Utc>,
        author: UserId,
    ) {
        let mut post = post_by(author, now + Duration::days(1));
        post.is_published = false;
        post.category = Some(category("drafts", false));

        assert!(is_visible(&post, Some(&author), now));
        assert!(!is_visible(&post, Some(&UserId::random()), now));
    }

    #[rstest]
    fn only_owner_may_mutate(now: DateTime<Utc>, author: UserId) {
        let post = post_by(author, now);
        let comment = comment_on(&post, author, "mine", now);
        let stranger = UserId::random();

        assert!(can_mutate(&post, &author));
        assert!(!can_mutate(&post, &stranger));
        assert!(can_mutate(&comment, &author));
        assert!(!can_mutate(&comment, &stranger));
    }
}
