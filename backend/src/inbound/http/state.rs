//! Shared HTTP adapter state.
//!
//! Handlers receive this via `web::Data` and depend only on driving ports, so
//! they can be exercised against mocks without any I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    CategoryRepository, CommentCommand, CommentRepository, LocationRepository, LoginService,
    PostCommand, PostQuery, PostRepository, ProfileCommand, ProfileQuery, ReferenceDataQuery,
    UserRepository,
};
use crate::domain::{
    CommentService, PostCommandService, PostQueryService, ProfileService, ReferenceDataService,
    StoreLoginService,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub posts: Arc<dyn PostQuery>,
    pub post_commands: Arc<dyn PostCommand>,
    pub comments: Arc<dyn CommentCommand>,
    pub profiles: Arc<dyn ProfileQuery>,
    pub profile_commands: Arc<dyn ProfileCommand>,
    pub reference_data: Arc<dyn ReferenceDataQuery>,
}

/// Entity Store adapters the domain services run on.
pub struct Repositories<P, C, K, L, U> {
    pub posts: Arc<P>,
    pub comments: Arc<C>,
    pub categories: Arc<K>,
    pub locations: Arc<L>,
    pub users: Arc<U>,
}

impl HttpState {
    /// Wire every driving port to the domain services over `repos`.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use blog_backend::inbound::http::state::{HttpState, Repositories};
    /// use blog_backend::outbound::memory::MemoryStore;
    /// use mockable::DefaultClock;
    ///
    /// let store = Arc::new(MemoryStore::new(Arc::new(DefaultClock)));
    /// let state = HttpState::from_repositories(
    ///     Repositories {
    ///         posts: store.clone(),
    ///         comments: store.clone(),
    ///         categories: store.clone(),
    ///         locations: store.clone(),
    ///         users: store,
    ///     },
    ///     Arc::new(DefaultClock),
    /// );
    /// # let _ = state;
    /// ```
    pub fn from_repositories<P, C, K, L, U>(
        repos: Repositories<P, C, K, L, U>,
        clock: Arc<dyn Clock>,
    ) -> Self
    where
        P: PostRepository + 'static,
        C: CommentRepository + 'static,
        K: CategoryRepository + 'static,
        L: LocationRepository + 'static,
        U: UserRepository + 'static,
    {
        let Repositories {
            posts,
            comments,
            categories,
            locations,
            users,
        } = repos;

        let post_query: Arc<dyn PostQuery> = Arc::new(PostQueryService::new(
            posts.clone(),
            comments.clone(),
            categories.clone(),
            users.clone(),
            clock.clone(),
        ));
        let profiles = Arc::new(ProfileService::new(users.clone(), post_query.clone()));

        Self {
            login: Arc::new(StoreLoginService::new(users.clone())),
            posts: post_query,
            post_commands: Arc::new(PostCommandService::new(
                posts.clone(),
                categories.clone(),
                locations.clone(),
                users,
                clock.clone(),
            )),
            comments: Arc::new(CommentService::new(posts, comments, clock)),
            profiles: profiles.clone(),
            profile_commands: profiles,
            reference_data: Arc::new(ReferenceDataService::new(categories, locations)),
        }
    }
}
