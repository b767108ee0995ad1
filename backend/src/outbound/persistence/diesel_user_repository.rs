//! PostgreSQL-backed account, credential and profile repository.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, RunQueryDsl};

use crate::domain::ports::{StoreError, UserRepository};
use crate::domain::{
    PasswordDigest, Profile, StoredCredentials, User, UserId, Username,
};

use super::diesel_helpers::{map_diesel_error, user_from_row, username_from_row};
use super::models::{ProfileRow, ProfileWrite, UserIdentityUpdate, UserRow};
use super::pool::DbPool;
use super::schema::{profiles, users};

/// Diesel implementation of [`UserRepository`].
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, StoreError> {
        let mut conn = self.pool.get().await?;
        let row: Option<UserRow> = users::table
            .find(*id.as_uuid())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(user_from_row).transpose()
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, StoreError> {
        let mut conn = self.pool.get().await?;
        let row: Option<UserRow> = users::table
            .filter(users::username.eq(username.as_str()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(user_from_row).transpose()
    }

    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<StoredCredentials>, StoreError> {
        let mut conn = self.pool.get().await?;
        let row: Option<(uuid::Uuid, String)> = users::table
            .filter(users::username.eq(username))
            .select((users::id, users::password_digest))
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(|(id, digest)| StoredCredentials {
            user_id: UserId::from_uuid(id),
            digest: PasswordDigest::from_stored(digest),
        }))
    }

    async fn find_profile(&self, user_id: &UserId) -> Result<Option<Profile>, StoreError> {
        let mut conn = self.pool.get().await?;
        let row: Option<(ProfileRow, String)> = profiles::table
            .inner_join(users::table)
            .filter(profiles::user_id.eq(*user_id.as_uuid()))
            .select((ProfileRow::as_select(), users::username))
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(|(profile, username)| {
            Ok(Profile {
                user_id: UserId::from_uuid(profile.user_id),
                username: username_from_row(username)?,
                first_name: profile.first_name,
                last_name: profile.last_name,
                email: profile.email,
            })
        })
        .transpose()
    }

    async fn save_profile(&self, profile: &Profile) -> Result<(), StoreError> {
        let mut conn = self.pool.get().await?;
        let user_id = *profile.user_id.as_uuid();
        conn.transaction(|conn| {
            async move {
                diesel::update(users::table.find(user_id))
                    .set(UserIdentityUpdate {
                        username: profile.username.as_str(),
                        first_name: &profile.first_name,
                        last_name: &profile.last_name,
                        email: &profile.email,
                    })
                    .execute(conn)
                    .await?;
                diesel::insert_into(profiles::table)
                    .values(ProfileWrite {
                        user_id,
                        first_name: &profile.first_name,
                        last_name: &profile.last_name,
                        email: &profile.email,
                    })
                    .on_conflict(profiles::user_id)
                    .do_update()
                    .set((
                        profiles::first_name.eq(excluded(profiles::first_name)),
                        profiles::last_name.eq(excluded(profiles::last_name)),
                        profiles::email.eq(excluded(profiles::email)),
                    ))
                    .execute(conn)
                    .await?;
                Ok::<_, diesel::result::Error>(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }
}
