//! Embedded schema migrations applied at start-up.

use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

use crate::domain::ports::StoreError;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Apply every pending migration against `database_url`.
///
/// Diesel's migration harness is synchronous, so the work runs on the
/// blocking thread pool.
pub async fn run_migrations(database_url: &str) -> Result<(), StoreError> {
    let url = database_url.to_owned();
    tokio::task::spawn_blocking(move || apply_pending(&url))
        .await
        .map_err(|err| StoreError::query(format!("migration task failed: {err}")))?
}

fn apply_pending(database_url: &str) -> Result<(), StoreError> {
    let mut conn = PgConnection::establish(database_url)
        .map_err(|err| StoreError::connection(format!("{err}")))?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| StoreError::query(format!("migration: {err}")))?;
    info!(count = applied.len(), "database migrations applied");
    Ok(())
}
