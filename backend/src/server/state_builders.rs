//! Builders for the HTTP state over the configured Entity Store.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::{info, warn};

use blog_backend::domain::ports::StoreError;
use blog_backend::domain::{CategorySlug, Username};
use blog_backend::inbound::http::state::{HttpState, Repositories};
use blog_backend::outbound::memory::MemoryStore;
use blog_backend::outbound::persistence::{
    DbPool, DieselCommentRepository, DieselPostRepository, DieselReferenceRepository,
    DieselUserRepository,
};

use super::ServerConfig;

const DEMO_USERNAME: &str = "admin";
const DEMO_PASSWORD: &str = "password";

fn diesel_state(pool: &DbPool, clock: Arc<dyn Clock>) -> HttpState {
    let reference = Arc::new(DieselReferenceRepository::new(pool.clone()));
    HttpState::from_repositories(
        Repositories {
            posts: Arc::new(DieselPostRepository::new(pool.clone())),
            comments: Arc::new(DieselCommentRepository::new(pool.clone())),
            categories: reference.clone(),
            locations: reference,
            users: Arc::new(DieselUserRepository::new(pool.clone())),
        },
        clock,
    )
}

/// In-process store holding one development account and starter reference
/// data so a fresh checkout can be exercised without PostgreSQL.
fn seeded_memory_store(clock: Arc<dyn Clock>) -> Result<MemoryStore, StoreError> {
    let store = MemoryStore::new(clock);
    let username = Username::new(DEMO_USERNAME)
        .map_err(|err| StoreError::query(format!("invalid demo username: {err}")))?;
    let slug = CategorySlug::new("general")
        .map_err(|err| StoreError::query(format!("invalid demo slug: {err}")))?;
    store.seed_user(username, DEMO_PASSWORD)?;
    store.seed_category("General", slug, true)?;
    store.seed_location("Nowhere in particular", true)?;
    Ok(store)
}

fn memory_state(clock: Arc<dyn Clock>) -> std::io::Result<HttpState> {
    let store = Arc::new(
        seeded_memory_store(clock.clone())
            .map_err(|err| std::io::Error::other(format!("seeding in-memory store: {err}")))?,
    );
    warn!(
        username = DEMO_USERNAME,
        "no database configured; serving from an in-memory store with a demo account"
    );
    Ok(HttpState::from_repositories(
        Repositories {
            posts: store.clone(),
            comments: store.clone(),
            categories: store.clone(),
            locations: store.clone(),
            users: store,
        },
        clock,
    ))
}

/// Wire handlers to PostgreSQL when a pool is configured, otherwise to a
/// seeded in-memory store.
///
/// # Errors
/// Returns [`std::io::Error`] when the in-memory store cannot be seeded.
pub(crate) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let state = match &config.db_pool {
        Some(pool) => {
            info!("serving from PostgreSQL");
            diesel_state(pool, clock)
        }
        None => memory_state(clock)?,
    };
    Ok(web::Data::new(state))
}
