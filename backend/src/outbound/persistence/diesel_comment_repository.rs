//! PostgreSQL-backed comment repository.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{CommentRepository, StoreError};
use crate::domain::{Comment, CommentId, CommentText, NewComment, PostId};

use super::diesel_helpers::{comment_from_row, map_diesel_error};
use super::models::{CommentRow, NewCommentRow};
use super::pool::DbPool;
use super::schema::{comments, users};

/// Diesel implementation of [`CommentRepository`].
#[derive(Clone)]
pub struct DieselCommentRepository {
    pool: DbPool,
}

impl DieselCommentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

async fn load_comment(
    conn: &mut AsyncPgConnection,
    id: i64,
) -> Result<Option<Comment>, StoreError> {
    let row: Option<(CommentRow, String)> = comments::table
        .inner_join(users::table)
        .filter(comments::id.eq(id))
        .select((CommentRow::as_select(), users::username))
        .first(conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;
    row.map(comment_from_row).transpose()
}

#[async_trait]
impl CommentRepository for DieselCommentRepository {
    async fn list_for_post(&self, post_id: PostId) -> Result<Vec<Comment>, StoreError> {
        let mut conn = self.pool.get().await?;
        let rows: Vec<(CommentRow, String)> = comments::table
            .inner_join(users::table)
            .filter(comments::post_id.eq(post_id.get()))
            .order((comments::created_at.asc(), comments::id.asc()))
            .select((CommentRow::as_select(), users::username))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(comment_from_row).collect()
    }

    async fn find_by_id(&self, id: CommentId) -> Result<Option<Comment>, StoreError> {
        let mut conn = self.pool.get().await?;
        load_comment(&mut conn, id.get()).await
    }

    async fn insert(&self, comment: &NewComment) -> Result<Comment, StoreError> {
        let mut conn = self.pool.get().await?;
        let id: i64 = diesel::insert_into(comments::table)
            .values(NewCommentRow {
                text: comment.text.as_str(),
                post_id: comment.post_id.get(),
                author_id: *comment.author.as_uuid(),
                created_at: comment.created_at,
            })
            .returning(comments::id)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        load_comment(&mut conn, id)
            .await?
            .ok_or_else(|| StoreError::query(format!("comment {id} missing after insert")))
    }

    async fn update_text(
        &self,
        id: CommentId,
        text: &CommentText,
    ) -> Result<Option<Comment>, StoreError> {
        let mut conn = self.pool.get().await?;
        let changed = diesel::update(comments::table.find(id.get()))
            .set(comments::text.eq(text.as_str()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if changed == 0 {
            return Ok(None);
        }
        load_comment(&mut conn, id.get()).await
    }

    async fn delete(&self, id: CommentId) -> Result<bool, StoreError> {
        let mut conn = self.pool.get().await?;
        let deleted = diesel::delete(comments::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}
