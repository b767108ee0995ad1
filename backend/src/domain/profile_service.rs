//! Profile pages and profile editing.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::PageRequest;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{
    EditProfileRequest, PostQuery, ProfileCommand, ProfileQuery, StoreError, UserRepository,
};
use crate::domain::{Error, PostListing, PostScope, Profile, RedirectTarget, UserId, Username};

/// Service implementing [`ProfileQuery`] and [`ProfileCommand`].
///
/// Profile pages reuse the post listing pipeline for the author's posts.
#[derive(Clone)]
pub struct ProfileService<U> {
    users: Arc<U>,
    posts: Arc<dyn PostQuery>,
}

impl<U> ProfileService<U> {
    /// Create a profile service.
    pub fn new(users: Arc<U>, posts: Arc<dyn PostQuery>) -> Self {
        Self { users, posts }
    }
}

#[async_trait]
impl<U> ProfileQuery for ProfileService<U>
where
    U: UserRepository,
{
    async fn get_profile(
        &self,
        username: Username,
        viewer: Option<UserId>,
        page: PageRequest,
    ) -> Result<PostListing, Error> {
        self.posts
            .list_posts(PostScope::ByAuthor(username), viewer, page)
            .await
    }

    async fn fetch_own_profile(&self, actor: UserId) -> Result<Profile, Error> {
        if let Some(profile) = self.users.find_profile(&actor).await? {
            return Ok(profile);
        }
        let user = self
            .users
            .find_by_id(&actor)
            .await?
            .ok_or_else(|| Error::unauthorized("login required"))?;
        let profile = Profile::from(&user);
        self.users.save_profile(&profile).await?;
        debug!(user_id = %actor, "profile created from account");
        Ok(profile)
    }
}

#[async_trait]
impl<U> ProfileCommand for ProfileService<U>
where
    U: UserRepository,
{
    async fn edit_profile(&self, request: EditProfileRequest) -> Result<RedirectTarget, Error> {
        let user = self
            .users
            .find_by_id(&request.actor)
            .await?
            .ok_or_else(|| Error::unauthorized("login required"))?;
        if user.username != request.target {
            if self.users.find_by_username(&request.target).await?.is_none() {
                return Err(Error::not_found(format!(
                    "user {} not found",
                    request.target
                )));
            }
            info!(actor = %request.actor, target = %request.target, "profile edit forbidden");
            return Err(Error::forbidden("you may only edit your own profile"));
        }

        let profile = request.edit.into_profile(user.id);
        match self.users.save_profile(&profile).await {
            Ok(()) => {
                debug!(user_id = %user.id, "profile updated");
                Ok(RedirectTarget::Index)
            }
            Err(StoreError::Conflict { .. }) => Err(Error::conflict(format!(
                "username {} is already taken",
                profile.username
            ))
            .with_details(json!({ "field": "username", "code": "username_taken" }))),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockPostQuery, MockUserRepository};
    use crate::domain::test_support::user;
    use crate::domain::{ErrorCode, ListingSubject, POSTS_PER_PAGE, ProfileEdit, ProfileEditInput};
    use pagination::Page;
    use rstest::rstest;

    fn edit(username: &str) -> ProfileEdit {
        ProfileEdit::try_from_input(ProfileEditInput {
            username: username.into(),
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
            email: "grace@example.org".into(),
        })
        .expect("valid edit")
    }

    fn service(users: MockUserRepository) -> ProfileService<MockUserRepository> {
        ProfileService::new(Arc::new(users), Arc::new(MockPostQuery::new()))
    }

    #[rstest]
    #[tokio::test]
    async fn profile_page_delegates_to_author_listing() {
        let owner = user("grace");
        let subject = ListingSubject::Author(owner.clone());
        let mut posts = MockPostQuery::new();
        posts
            .expect_list_posts()
            .withf(|scope, _, _| matches!(scope, PostScope::ByAuthor(name) if name.as_str() == "grace"))
            .times(1)
            .returning(move |_, _, page| {
                Ok(PostListing {
                    subject: subject.clone(),
                    page: Page::new(Vec::new(), page, 0),
                })
            });
        let service = ProfileService::new(Arc::new(MockUserRepository::new()), Arc::new(posts));

        let listing = service
            .get_profile(
                owner.username.clone(),
                None,
                PageRequest::first(POSTS_PER_PAGE),
            )
            .await
            .expect("profile page");

        assert_eq!(listing.subject, ListingSubject::Author(owner));
    }

    #[rstest]
    #[tokio::test]
    async fn missing_profile_is_created_from_account() {
        let account = user("grace");
        let id = account.id;
        let mut users = MockUserRepository::new();
        users.expect_find_profile().returning(|_| Ok(None));
        users
            .expect_find_by_id()
            .returning(move |_| Ok(Some(account.clone())));
        users
            .expect_save_profile()
            .withf(move |profile| profile.user_id == id)
            .times(1)
            .returning(|_| Ok(()));

        let profile = service(users)
            .fetch_own_profile(id)
            .await
            .expect("profile created");

        assert_eq!(profile.username.as_str(), "grace");
    }

    #[rstest]
    #[tokio::test]
    async fn editing_someone_else_is_forbidden() {
        let actor = user("grace");
        let other = user("alan");
        let actor_id = actor.id;
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(move |_| Ok(Some(actor.clone())));
        users
            .expect_find_by_username()
            .returning(move |_| Ok(Some(other.clone())));
        users.expect_save_profile().never();

        let err = service(users)
            .edit_profile(EditProfileRequest {
                actor: actor_id,
                target: Username::new("alan").expect("valid username"),
                edit: edit("alan"),
            })
            .await
            .expect_err("not their profile");

        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[rstest]
    #[tokio::test]
    async fn taken_username_is_a_conflict() {
        let actor = user("grace");
        let actor_id = actor.id;
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(move |_| Ok(Some(actor.clone())));
        users
            .expect_save_profile()
            .returning(|_| Err(StoreError::conflict("users_username_key")));

        let err = service(users)
            .edit_profile(EditProfileRequest {
                actor: actor_id,
                target: Username::new("grace").expect("valid username"),
                edit: edit("alan"),
            })
            .await
            .expect_err("username taken");

        assert_eq!(err.code(), ErrorCode::Conflict);
        assert_eq!(
            err.details(),
            Some(&json!({"field": "username", "code": "username_taken"}))
        );
    }

    #[rstest]
    #[tokio::test]
    async fn own_edit_redirects_to_index() {
        let actor = user("grace");
        let actor_id = actor.id;
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(move |_| Ok(Some(actor.clone())));
        users
            .expect_save_profile()
            .withf(|profile| profile.username.as_str() == "admiral" && profile.last_name == "Hopper")
            .times(1)
            .returning(|_| Ok(()));

        let target = service(users)
            .edit_profile(EditProfileRequest {
                actor: actor_id,
                target: Username::new("grace").expect("valid username"),
                edit: edit("admiral"),
            })
            .await
            .expect("own profile");

        assert_eq!(target, RedirectTarget::Index);
    }
}
