//! Driven port for location reference data.

use async_trait::async_trait;

use crate::domain::{Location, LocationId};

use super::StoreError;

/// Entity Store access for locations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LocationRepository: Send + Sync {
    async fn find_by_id(&self, id: LocationId) -> Result<Option<Location>, StoreError>;

    /// Published locations ordered by title.
    async fn list_published(&self) -> Result<Vec<Location>, StoreError>;
}
