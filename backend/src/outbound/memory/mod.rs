//! In-process Entity Store adapter.
//!
//! `MemoryStore` implements every driven port over plain maps guarded by a
//! single `RwLock`. It backs the server when no database URL is configured
//! and gives integration tests a store with the same referential rules as
//! the PostgreSQL schema: deleting a category or location clears the
//! reference on its posts, deleting a user removes their posts and comments.

mod repositories;
#[cfg(test)]
mod tests;

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use mockable::Clock;
use tracing::debug;

use crate::domain::ports::StoreError;
use crate::domain::{
    Category, CategoryId, CategorySlug, CommentId, Location, LocationId, PasswordDigest, Post,
    PostId, Profile, User, UserId, Username,
};

#[derive(Debug, Clone)]
struct UserRecord {
    user: User,
    digest: PasswordDigest,
}

#[derive(Debug, Clone)]
struct PostRecord {
    id: PostId,
    title: String,
    text: String,
    image: Option<String>,
    pub_date: DateTime<Utc>,
    is_published: bool,
    author: UserId,
    location: Option<LocationId>,
    category: Option<CategoryId>,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct CommentRecord {
    id: CommentId,
    post_id: PostId,
    text: String,
    author: UserId,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct State {
    users: BTreeMap<UserId, UserRecord>,
    profiles: BTreeMap<UserId, Profile>,
    categories: BTreeMap<CategoryId, Category>,
    locations: BTreeMap<LocationId, Location>,
    posts: BTreeMap<PostId, PostRecord>,
    comments: BTreeMap<CommentId, CommentRecord>,
    last_id: i64,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn username_taken(&self, username: &Username, except: Option<UserId>) -> bool {
        self.users
            .values()
            .any(|record| &record.user.username == username && Some(record.user.id) != except)
    }

    fn username_of(&self, id: &UserId) -> Result<Username, StoreError> {
        self.users
            .get(id)
            .map(|record| record.user.username.clone())
            .ok_or_else(|| StoreError::query(format!("dangling author reference {id}")))
    }

    fn hydrate_post(&self, record: &PostRecord) -> Result<Post, StoreError> {
        Ok(Post {
            id: record.id,
            title: record.title.clone(),
            text: record.text.clone(),
            image: record.image.clone(),
            pub_date: record.pub_date,
            is_published: record.is_published,
            author: record.author,
            author_username: self.username_of(&record.author)?,
            location: record
                .location
                .and_then(|id| self.locations.get(&id).cloned()),
            category: record
                .category
                .and_then(|id| self.categories.get(&id).cloned()),
            created_at: record.created_at,
        })
    }

    fn comment_count(&self, post_id: PostId) -> u64 {
        let count = self
            .comments
            .values()
            .filter(|comment| comment.post_id == post_id)
            .count();
        u64::try_from(count).unwrap_or(u64::MAX)
    }
}

/// Thread-safe in-memory store implementing all Entity Store ports.
pub struct MemoryStore {
    state: RwLock<State>,
    clock: Arc<dyn Clock>,
}

impl MemoryStore {
    /// Create an empty store stamping seeded rows with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: RwLock::new(State::default()),
            clock,
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, State>, StoreError> {
        self.state
            .read()
            .map_err(|_| StoreError::query("memory store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, State>, StoreError> {
        self.state
            .write()
            .map_err(|_| StoreError::query("memory store lock poisoned"))
    }

    /// Register an account with the given password.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Conflict`] when the username is already taken.
    pub fn seed_user(&self, username: Username, password: &str) -> Result<User, StoreError> {
        let mut state = self.write()?;
        if state.username_taken(&username, None) {
            return Err(StoreError::conflict(format!("username {username} is taken")));
        }
        let user = User {
            id: UserId::random(),
            username,
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
        };
        let digest = PasswordDigest::derive(&user.id, password);
        state.users.insert(
            user.id,
            UserRecord {
                user: user.clone(),
                digest,
            },
        );
        debug!(user_id = %user.id, "seeded user");
        Ok(user)
    }

    /// Register a category.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Conflict`] when the slug is already in use.
    pub fn seed_category(
        &self,
        title: &str,
        slug: CategorySlug,
        is_published: bool,
    ) -> Result<Category, StoreError> {
        let created_at = self.clock.utc();
        let mut state = self.write()?;
        if state.categories.values().any(|category| category.slug == slug) {
            return Err(StoreError::conflict(format!("category slug {slug} is taken")));
        }
        let category = Category {
            id: CategoryId::new(state.next_id()),
            title: title.to_owned(),
            description: String::new(),
            slug,
            is_published,
            created_at,
        };
        state.categories.insert(category.id, category.clone());
        Ok(category)
    }

    /// Register a location.
    pub fn seed_location(&self, title: &str, is_published: bool) -> Result<Location, StoreError> {
        let created_at = self.clock.utc();
        let mut state = self.write()?;
        let location = Location {
            id: LocationId::new(state.next_id()),
            title: title.to_owned(),
            is_published,
            created_at,
        };
        state.locations.insert(location.id, location.clone());
        Ok(location)
    }

    /// Remove a category, clearing it from every post that referenced it.
    pub fn delete_category(&self, id: CategoryId) -> Result<bool, StoreError> {
        let mut state = self.write()?;
        if state.categories.remove(&id).is_none() {
            return Ok(false);
        }
        for post in state.posts.values_mut() {
            if post.category == Some(id) {
                post.category = None;
            }
        }
        Ok(true)
    }

    /// Remove a location, clearing it from every post that referenced it.
    pub fn delete_location(&self, id: LocationId) -> Result<bool, StoreError> {
        let mut state = self.write()?;
        if state.locations.remove(&id).is_none() {
            return Ok(false);
        }
        for post in state.posts.values_mut() {
            if post.location == Some(id) {
                post.location = None;
            }
        }
        Ok(true)
    }

    /// Remove an account together with its profile, posts and comments.
    pub fn delete_user(&self, id: UserId) -> Result<bool, StoreError> {
        let mut state = self.write()?;
        if state.users.remove(&id).is_none() {
            return Ok(false);
        }
        state.profiles.remove(&id);
        state.posts.retain(|_, post| post.author != id);
        let State {
            posts, comments, ..
        } = &mut *state;
        comments.retain(|_, comment| comment.author != id && posts.contains_key(&comment.post_id));
        Ok(true)
    }
}
