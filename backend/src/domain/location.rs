//! Named places a post can be attached to.

use std::fmt;

use chrono::{DateTime, Utc};

use super::macros::define_entity_id;

define_entity_id!(
    /// Surrogate key of a [`Location`].
    LocationId
);

/// Place where a post was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub id: LocationId,
    pub title: String,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}
