//! Post listing, retrieval and authoring services.
//!
//! Reads apply the visibility policy; edits and deletes apply the ownership
//! policy and turn a refusal into a silent redirect to the post.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use pagination::{Page, PageRequest};
use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{
    CategoryRepository, CommentRepository, CreatePostRequest, EditPostRequest, LocationRepository,
    PostCommand, PostQuery, PostRepository, UserRepository,
};
use crate::domain::{
    Comment, CreatedPost, Error, ListingSubject, MutationOutcome, NewPost, Post, PostDetail,
    PostDraft, PostId, PostListQuery, PostListing, PostScope, PostSummary, RedirectTarget, UserId,
    VisibilityRule, policy,
};

fn post_not_found(post_id: PostId) -> Error {
    Error::not_found(format!("post {post_id} not found"))
}

/// Read-side post service.
#[derive(Clone)]
pub struct PostQueryService<P, C, K, U> {
    posts: Arc<P>,
    comments: Arc<C>,
    categories: Arc<K>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<P, C, K, U> PostQueryService<P, C, K, U> {
    /// Create a query service over the given repositories.
    pub fn new(
        posts: Arc<P>,
        comments: Arc<C>,
        categories: Arc<K>,
        users: Arc<U>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            posts,
            comments,
            categories,
            users,
            clock,
        }
    }
}

impl<P, C, K, U> PostQueryService<P, C, K, U>
where
    P: PostRepository,
    C: CommentRepository,
    K: CategoryRepository,
    U: UserRepository,
{
    async fn visible_post(&self, post_id: PostId, viewer: Option<UserId>) -> Result<Post, Error> {
        let now = self.clock.utc();
        self.posts
            .find_by_id(post_id)
            .await?
            .filter(|post| policy::is_visible(post, viewer.as_ref(), now))
            .ok_or_else(|| post_not_found(post_id))
    }

    async fn resolve_scope(
        &self,
        scope: PostScope,
        viewer: Option<UserId>,
        page: PageRequest,
    ) -> Result<(ListingSubject, PostListQuery), Error> {
        let public = VisibilityRule::Public {
            now: self.clock.utc(),
        };
        let mut query = PostListQuery {
            author: None,
            category: None,
            visibility: public,
            page,
        };
        let subject = match scope {
            PostScope::All => ListingSubject::Site,
            PostScope::ByAuthor(username) => {
                let user = self
                    .users
                    .find_by_username(&username)
                    .await?
                    .ok_or_else(|| Error::not_found(format!("user {username} not found")))?;
                if viewer == Some(user.id) {
                    query.visibility = VisibilityRule::Unrestricted;
                }
                query.author = Some(user.id);
                ListingSubject::Author(user)
            }
            PostScope::ByCategory(slug) => {
                let category = self
                    .categories
                    .find_by_slug(&slug)
                    .await?
                    .filter(|category| category.is_published)
                    .ok_or_else(|| Error::not_found(format!("category {slug} not found")))?;
                query.category = Some(category.id);
                ListingSubject::Category(category)
            }
        };
        Ok((subject, query))
    }
}

#[async_trait]
impl<P, C, K, U> PostQuery for PostQueryService<P, C, K, U>
where
    P: PostRepository,
    C: CommentRepository,
    K: CategoryRepository,
    U: UserRepository,
{
    async fn list_posts(
        &self,
        scope: PostScope,
        viewer: Option<UserId>,
        page: PageRequest,
    ) -> Result<PostListing, Error> {
        let (subject, query) = self.resolve_scope(scope, viewer, page).await?;
        let slice = self.posts.list(&query).await?;
        Ok(PostListing {
            subject,
            page: Page::new(slice.items, page, slice.total),
        })
    }

    async fn get_post(
        &self,
        post_id: PostId,
        viewer: Option<UserId>,
    ) -> Result<PostDetail, Error> {
        let post = self.visible_post(post_id, viewer).await?;
        let comments = self.comments.list_for_post(post_id).await?;
        let comment_count = u64::try_from(comments.len()).unwrap_or(u64::MAX);
        Ok(PostDetail {
            summary: PostSummary {
                post,
                comment_count,
            },
            comments,
        })
    }

    async fn list_comments(
        &self,
        post_id: PostId,
        viewer: Option<UserId>,
    ) -> Result<Vec<Comment>, Error> {
        self.visible_post(post_id, viewer).await?;
        Ok(self.comments.list_for_post(post_id).await?)
    }
}

/// Write-side post service.
#[derive(Clone)]
pub struct PostCommandService<P, K, L, U> {
    posts: Arc<P>,
    categories: Arc<K>,
    locations: Arc<L>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<P, K, L, U> PostCommandService<P, K, L, U> {
    /// Create a command service over the given repositories.
    pub fn new(
        posts: Arc<P>,
        categories: Arc<K>,
        locations: Arc<L>,
        users: Arc<U>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            posts,
            categories,
            locations,
            users,
            clock,
        }
    }
}

impl<P, K, L, U> PostCommandService<P, K, L, U>
where
    P: PostRepository,
    K: CategoryRepository,
    L: LocationRepository,
    U: UserRepository,
{
    async fn check_references(&self, draft: &PostDraft) -> Result<(), Error> {
        if let Some(id) = draft.category_id() {
            if self.categories.find_by_id(id).await?.is_none() {
                return Err(Error::invalid_request(format!("category {id} does not exist"))
                    .with_details(json!({ "field": "categoryId", "code": "unknown_category" })));
            }
        }
        if let Some(id) = draft.location_id() {
            if self.locations.find_by_id(id).await?.is_none() {
                return Err(Error::invalid_request(format!("location {id} does not exist"))
                    .with_details(json!({ "field": "locationId", "code": "unknown_location" })));
            }
        }
        Ok(())
    }

    async fn existing_post(&self, post_id: PostId) -> Result<Post, Error> {
        self.posts
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| post_not_found(post_id))
    }
}

#[async_trait]
impl<P, K, L, U> PostCommand for PostCommandService<P, K, L, U>
where
    P: PostRepository,
    K: CategoryRepository,
    L: LocationRepository,
    U: UserRepository,
{
    async fn create_post(&self, request: CreatePostRequest) -> Result<CreatedPost, Error> {
        let author = self
            .users
            .find_by_id(&request.author)
            .await?
            .ok_or_else(|| Error::unauthorized("login required"))?;
        self.check_references(&request.draft).await?;

        let post = self
            .posts
            .insert(&NewPost {
                author: author.id,
                draft: request.draft,
                created_at: self.clock.utc(),
            })
            .await?;
        debug!(post_id = %post.id, author = %author.id, "post created");
        Ok(CreatedPost {
            post,
            redirect: RedirectTarget::Profile(author.username),
        })
    }

    async fn edit_post(&self, request: EditPostRequest) -> Result<MutationOutcome, Error> {
        let post = self.existing_post(request.post_id).await?;
        let target = RedirectTarget::PostDetail(post.id);
        if !policy::can_mutate(&post, &request.actor) {
            info!(post_id = %post.id, actor = %request.actor, "post edit denied");
            return Ok(MutationOutcome::Denied(target));
        }
        let draft = request.draft?;
        self.check_references(&draft).await?;
        self.posts
            .update(post.id, &draft)
            .await?
            .ok_or_else(|| post_not_found(post.id))?;
        debug!(post_id = %post.id, "post updated");
        Ok(MutationOutcome::Applied(target))
    }

    async fn delete_post(
        &self,
        post_id: PostId,
        actor: UserId,
    ) -> Result<MutationOutcome, Error> {
        let post = self.existing_post(post_id).await?;
        if !policy::can_mutate(&post, &actor) {
            info!(post_id = %post.id, actor = %actor, "post delete denied");
            return Ok(MutationOutcome::Denied(RedirectTarget::PostDetail(post.id)));
        }
        if !self.posts.delete(post.id).await? {
            return Err(post_not_found(post.id));
        }
        debug!(post_id = %post.id, "post deleted");
        Ok(MutationOutcome::Applied(RedirectTarget::Index))
    }
}

#[cfg(test)]
#[path = "post_service_tests.rs"]
mod tests;
