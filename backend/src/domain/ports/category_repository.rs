//! Driven port for category reference data.

use async_trait::async_trait;

use crate::domain::{Category, CategoryId, CategorySlug};

use super::StoreError;

/// Entity Store access for categories.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Look a category up by its unique slug, published or not.
    async fn find_by_slug(&self, slug: &CategorySlug) -> Result<Option<Category>, StoreError>;

    async fn find_by_id(&self, id: CategoryId) -> Result<Option<Category>, StoreError>;

    /// Published categories ordered by title.
    async fn list_published(&self) -> Result<Vec<Category>, StoreError>;
}
