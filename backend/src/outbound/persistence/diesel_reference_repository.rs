//! PostgreSQL-backed category and location repositories.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CategoryRepository, LocationRepository, StoreError};
use crate::domain::{Category, CategoryId, CategorySlug, Location, LocationId};

use super::diesel_helpers::{category_from_row, location_from_row, map_diesel_error};
use super::models::{CategoryRow, LocationRow};
use super::pool::DbPool;
use super::schema::{categories, locations};

/// Diesel implementation of [`CategoryRepository`] and [`LocationRepository`].
#[derive(Clone)]
pub struct DieselReferenceRepository {
    pool: DbPool,
}

impl DieselReferenceRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for DieselReferenceRepository {
    async fn find_by_slug(&self, slug: &CategorySlug) -> Result<Option<Category>, StoreError> {
        let mut conn = self.pool.get().await?;
        let row: Option<CategoryRow> = categories::table
            .filter(categories::slug.eq(slug.as_str()))
            .select(CategoryRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(category_from_row).transpose()
    }

    async fn find_by_id(&self, id: CategoryId) -> Result<Option<Category>, StoreError> {
        let mut conn = self.pool.get().await?;
        let row: Option<CategoryRow> = categories::table
            .find(id.get())
            .select(CategoryRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(category_from_row).transpose()
    }

    async fn list_published(&self) -> Result<Vec<Category>, StoreError> {
        let mut conn = self.pool.get().await?;
        let rows: Vec<CategoryRow> = categories::table
            .filter(categories::is_published.eq(true))
            .order((categories::title.asc(), categories::id.asc()))
            .select(CategoryRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(category_from_row).collect()
    }
}

#[async_trait]
impl LocationRepository for DieselReferenceRepository {
    async fn find_by_id(&self, id: LocationId) -> Result<Option<Location>, StoreError> {
        let mut conn = self.pool.get().await?;
        let row: Option<LocationRow> = locations::table
            .find(id.get())
            .select(LocationRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(location_from_row))
    }

    async fn list_published(&self) -> Result<Vec<Location>, StoreError> {
        let mut conn = self.pool.get().await?;
        let rows: Vec<LocationRow> = locations::table
            .filter(locations::is_published.eq(true))
            .order((locations::title.asc(), locations::id.asc()))
            .select(LocationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(location_from_row).collect())
    }
}
