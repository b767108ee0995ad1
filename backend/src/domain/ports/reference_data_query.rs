//! Driving port for category and location pick lists.

use async_trait::async_trait;

use crate::domain::{Category, Error, Location};

/// Published reference data offered by post forms.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReferenceDataQuery: Send + Sync {
    async fn list_categories(&self) -> Result<Vec<Category>, Error>;

    async fn list_locations(&self) -> Result<Vec<Location>, Error>;
}
