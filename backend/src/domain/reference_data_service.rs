//! Category and location pick lists.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{CategoryRepository, LocationRepository, ReferenceDataQuery};
use crate::domain::{Category, Error, Location};

/// Service implementing [`ReferenceDataQuery`].
#[derive(Clone)]
pub struct ReferenceDataService<K, L> {
    categories: Arc<K>,
    locations: Arc<L>,
}

impl<K, L> ReferenceDataService<K, L> {
    pub fn new(categories: Arc<K>, locations: Arc<L>) -> Self {
        Self {
            categories,
            locations,
        }
    }
}

#[async_trait]
impl<K, L> ReferenceDataQuery for ReferenceDataService<K, L>
where
    K: CategoryRepository,
    L: LocationRepository,
{
    async fn list_categories(&self) -> Result<Vec<Category>, Error> {
        Ok(self.categories.list_published().await?)
    }

    async fn list_locations(&self) -> Result<Vec<Location>, Error> {
        Ok(self.locations.list_published().await?)
    }
}
