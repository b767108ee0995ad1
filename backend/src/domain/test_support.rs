//! Builders shared by domain unit tests.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use super::{
    Category, CategoryId, CategorySlug, Comment, CommentId, Post, PostId, User, UserId, Username,
};

pub(crate) fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 10, 12, 0, 0)
        .single()
        .expect("valid fixed instant")
}

/// Clock pinned to one instant.
pub(crate) struct FixedClock(pub(crate) DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

pub(crate) fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(fixed_now()))
}

pub(crate) fn user(username: &str) -> User {
    User {
        id: UserId::random(),
        username: Username::new(username).expect("valid username"),
        first_name: String::new(),
        last_name: String::new(),
        email: format!("{username}@example.org"),
    }
}

pub(crate) fn category(slug: &str, is_published: bool) -> Category {
    Category {
        id: CategoryId::new(1),
        title: slug.to_uppercase(),
        description: String::new(),
        slug: CategorySlug::new(slug).expect("valid slug"),
        is_published,
        created_at: fixed_now(),
    }
}

pub(crate) fn post_by(author: UserId, pub_date: DateTime<Utc>) -> Post {
    Post {
        id: PostId::new(1),
        title: "Title".into(),
        text: "Body".into(),
        image: None,
        pub_date,
        is_published: true,
        author,
        author_username: Username::new("author").expect("valid username"),
        location: None,
        category: None,
        created_at: fixed_now(),
    }
}

pub(crate) fn comment_on(post: &Post, author: UserId, text: &str, at: DateTime<Utc>) -> Comment {
    Comment {
        id: CommentId::new(1),
        post_id: post.id,
        text: text.into(),
        author,
        author_username: Username::new("commenter").expect("valid username"),
        created_at: at,
    }
}
