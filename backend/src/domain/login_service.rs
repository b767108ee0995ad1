//! Credential checks against digests held by the Entity Store.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{LoginService, UserRepository};
use crate::domain::{Error, LoginCredentials, PasswordDigest, UserId};

/// [`LoginService`] backed by a [`UserRepository`].
#[derive(Clone)]
pub struct StoreLoginService<U> {
    users: Arc<U>,
}

impl<U> StoreLoginService<U> {
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl<U> LoginService for StoreLoginService<U>
where
    U: UserRepository,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let Some(stored) = self
            .users
            .find_credentials(credentials.username())
            .await?
        else {
            debug!("login for unknown username");
            return Err(Error::unauthorized("invalid credentials"));
        };
        let submitted = PasswordDigest::derive(&stored.user_id, credentials.password());
        if stored.digest.matches(&submitted) {
            Ok(stored.user_id)
        } else {
            debug!(user_id = %stored.user_id, "login with wrong password");
            Err(Error::unauthorized("invalid credentials"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::StoredCredentials;
    use crate::domain::ports::MockUserRepository;
    use rstest::rstest;

    #[rstest]
    #[case("admin", "password", true)]
    #[case("admin", "wrong", false)]
    #[case("other", "password", false)]
    #[tokio::test]
    async fn checks_password_digest(
        #[case] username: &str,
        #[case] password: &str,
        #[case] should_succeed: bool,
    ) {
        let admin = UserId::random();
        let mut users = MockUserRepository::new();
        users.expect_find_credentials().returning(move |name| {
            Ok((name == "admin").then(|| StoredCredentials {
                user_id: admin,
                digest: PasswordDigest::derive(&admin, "password"),
            }))
        });
        let service = StoreLoginService::new(Arc::new(users));
        let creds = LoginCredentials::try_from_parts(username, password).expect("credentials");

        match (should_succeed, service.authenticate(&creds).await) {
            (true, Ok(id)) => assert_eq!(id, admin),
            (false, Err(err)) => assert_eq!(err.code(), ErrorCode::Unauthorized),
            (true, Err(err)) => panic!("expected success, got {err:?}"),
            (false, Ok(id)) => panic!("expected failure, got {id}"),
        }
    }
}
