//! PostgreSQL-backed post repository.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{PostRepository, StoreError};
use crate::domain::{
    NewPost, Post, PostDraft, PostId, PostListQuery, PostSlice, PostSummary, VisibilityRule,
};

use super::diesel_helpers::{JoinedPostRow, map_diesel_error, post_from_row};
use super::models::{CategoryRow, LocationRow, NewPostRow, PostRow, PostWrite};
use super::pool::DbPool;
use super::schema::{categories, comments, locations, posts, users};

/// Posts joined with their author and optional category and location.
macro_rules! joined_posts {
    () => {
        posts::table
            .inner_join(users::table)
            .left_join(categories::table)
            .left_join(locations::table)
    };
}

macro_rules! post_columns {
    () => {
        (
            PostRow::as_select(),
            users::username,
            Option::<CategoryRow>::as_select(),
            Option::<LocationRow>::as_select(),
        )
    };
}

/// Apply the author, category and visibility filters of a [`PostListQuery`]
/// to a boxed query over the joined post tables.
macro_rules! filter_posts {
    ($query:expr, $list:expr) => {{
        let mut query = $query;
        if let Some(author) = $list.author {
            query = query.filter(posts::author_id.eq(*author.as_uuid()));
        }
        if let Some(category) = $list.category {
            query = query.filter(posts::category_id.eq(category.get()));
        }
        if let VisibilityRule::Public { now } = $list.visibility {
            query = query
                .filter(posts::is_published.eq(true))
                .filter(posts::pub_date.le(now))
                .filter(
                    posts::category_id
                        .is_null()
                        .or(categories::is_published.eq(true)),
                );
        }
        query
    }};
}

/// Diesel implementation of [`PostRepository`].
#[derive(Clone)]
pub struct DieselPostRepository {
    pool: DbPool,
}

impl DieselPostRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn content(draft: &PostDraft) -> PostWrite<'_> {
    PostWrite {
        title: draft.title(),
        text: draft.text(),
        image: draft.image(),
        pub_date: draft.pub_date(),
        is_published: draft.is_published(),
        location_id: draft.location_id().map(|id| id.get()),
        category_id: draft.category_id().map(|id| id.get()),
    }
}

async fn load_post(conn: &mut AsyncPgConnection, id: i64) -> Result<Option<Post>, StoreError> {
    let row: Option<JoinedPostRow> = joined_posts!()
        .filter(posts::id.eq(id))
        .select(post_columns!())
        .first(conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;
    row.map(post_from_row).transpose()
}

async fn comment_counts(
    conn: &mut AsyncPgConnection,
    post_ids: Vec<i64>,
) -> Result<HashMap<i64, i64>, StoreError> {
    if post_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let counts: Vec<(i64, i64)> = comments::table
        .filter(comments::post_id.eq_any(post_ids))
        .group_by(comments::post_id)
        .select((comments::post_id, count_star()))
        .load(conn)
        .await
        .map_err(map_diesel_error)?;
    Ok(counts.into_iter().collect())
}

#[async_trait]
impl PostRepository for DieselPostRepository {
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, StoreError> {
        let mut conn = self.pool.get().await?;
        load_post(&mut conn, id.get()).await
    }

    async fn list(&self, query: &PostListQuery) -> Result<PostSlice, StoreError> {
        let mut conn = self.pool.get().await?;

        let total: i64 = filter_posts!(joined_posts!().count().into_boxed(), query)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let rows: Vec<JoinedPostRow> =
            filter_posts!(joined_posts!().select(post_columns!()).into_boxed(), query)
                .order((posts::pub_date.desc(), posts::id.desc()))
                .offset(i64::try_from(query.page.offset()).unwrap_or(i64::MAX))
                .limit(i64::from(query.page.size()))
                .load(&mut conn)
                .await
                .map_err(map_diesel_error)?;

        let ids = rows.iter().map(|(post, ..)| post.id).collect();
        let counts = comment_counts(&mut conn, ids).await?;
        let items = rows
            .into_iter()
            .map(|row| {
                let count = counts.get(&row.0.id).copied().unwrap_or(0);
                post_from_row(row).map(|post| PostSummary {
                    post,
                    comment_count: u64::try_from(count).unwrap_or(0),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PostSlice {
            items,
            total: u64::try_from(total).unwrap_or(0),
        })
    }

    async fn insert(&self, post: &NewPost) -> Result<Post, StoreError> {
        let mut conn = self.pool.get().await?;
        let id: i64 = diesel::insert_into(posts::table)
            .values(NewPostRow {
                content: content(&post.draft),
                author_id: *post.author.as_uuid(),
                created_at: post.created_at,
            })
            .returning(posts::id)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        load_post(&mut conn, id)
            .await?
            .ok_or_else(|| StoreError::query(format!("post {id} missing after insert")))
    }

    async fn update(&self, id: PostId, draft: &PostDraft) -> Result<Option<Post>, StoreError> {
        let mut conn = self.pool.get().await?;
        let changed = diesel::update(posts::table.find(id.get()))
            .set(content(draft))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if changed == 0 {
            return Ok(None);
        }
        load_post(&mut conn, id.get()).await
    }

    async fn delete(&self, id: PostId) -> Result<bool, StoreError> {
        let mut conn = self.pool.get().await?;
        let deleted = diesel::delete(posts::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}
