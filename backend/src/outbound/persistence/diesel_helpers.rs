//! Error mapping and row conversion shared by the Diesel repositories.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::StoreError;
use crate::domain::{
    Category, CategoryId, CategorySlug, Comment, CommentId, Location, LocationId, Post, PostId,
    User, UserId, Username,
};

use super::models::{CategoryRow, CommentRow, LocationRow, PostRow, UserRow};

/// Map a Diesel failure onto [`StoreError`], logging the driver detail.
pub(crate) fn map_diesel_error(error: DieselError) -> StoreError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            StoreError::conflict(info.constraint_name().unwrap_or("unique constraint"))
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            StoreError::connection("database connection closed")
        }
        DieselError::DatabaseError(_, _) => StoreError::query("database error"),
        DieselError::QueryBuilderError(_) => StoreError::query("database query error"),
        _ => StoreError::query("database error"),
    }
}

pub(crate) fn username_from_row(raw: String) -> Result<Username, StoreError> {
    Username::new(raw).map_err(|err| StoreError::query(format!("stored username invalid: {err}")))
}

pub(crate) fn user_from_row(row: UserRow) -> Result<User, StoreError> {
    Ok(User {
        id: UserId::from_uuid(row.id),
        username: username_from_row(row.username)?,
        first_name: row.first_name,
        last_name: row.last_name,
        email: row.email,
    })
}

pub(crate) fn category_from_row(row: CategoryRow) -> Result<Category, StoreError> {
    let slug = CategorySlug::new(row.slug)
        .map_err(|err| StoreError::query(format!("stored category slug invalid: {err}")))?;
    Ok(Category {
        id: CategoryId::new(row.id),
        title: row.title,
        description: row.description,
        slug,
        is_published: row.is_published,
        created_at: row.created_at,
    })
}

pub(crate) fn location_from_row(row: LocationRow) -> Location {
    Location {
        id: LocationId::new(row.id),
        title: row.title,
        is_published: row.is_published,
        created_at: row.created_at,
    }
}

/// A post row joined with its author's username and optional references.
pub(crate) type JoinedPostRow = (PostRow, String, Option<CategoryRow>, Option<LocationRow>);

pub(crate) fn post_from_row(
    (row, username, category, location): JoinedPostRow,
) -> Result<Post, StoreError> {
    Ok(Post {
        id: PostId::new(row.id),
        title: row.title,
        text: row.text,
        image: row.image,
        pub_date: row.pub_date,
        is_published: row.is_published,
        author: UserId::from_uuid(row.author_id),
        author_username: username_from_row(username)?,
        location: location.map(location_from_row),
        category: category.map(category_from_row).transpose()?,
        created_at: row.created_at,
    })
}

pub(crate) fn comment_from_row((row, username): (CommentRow, String)) -> Result<Comment, StoreError> {
    Ok(Comment {
        id: CommentId::new(row.id),
        post_id: PostId::new(row.post_id),
        text: row.text,
        author: UserId::from_uuid(row.author_id),
        author_username: username_from_row(username)?,
        created_at: row.created_at,
    })
}
