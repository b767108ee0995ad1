//! Login credentials and password digests.
//!
//! Passwords are never stored. Adapters persist a digest derived from the
//! password salted with the owning user's identifier, and the login service
//! compares digests in constant time.

use std::fmt;

use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use super::UserId;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Credentials submitted to the login endpoint.
///
/// # Examples
/// ```
/// use blog_backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" author ", "hunter2").unwrap();
/// assert_eq!(creds.username(), "author");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw inputs, trimming the username.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            username: username.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Submitted username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Submitted password.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Hex-encoded SHA-256 digest of a user's password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Derive the digest for `password` salted with `user`.
    #[must_use]
    pub fn derive(user: &UserId, password: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(user.as_uuid().as_bytes());
        hasher.update(password.as_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    /// Wrap a digest loaded from storage.
    #[must_use]
    pub fn from_stored(hex_digest: impl Into<String>) -> Self {
        Self(hex_digest.into())
    }

    /// Hex text for persistence.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Constant-time comparison against another digest.
    #[must_use]
    pub fn matches(&self, other: &Self) -> bool {
        let (left, right) = (self.0.as_bytes(), other.0.as_bytes());
        left.len() == right.len()
            && left
                .iter()
                .zip(right)
                .fold(0_u8, |acc, (a, b)| acc | (a ^ b))
                == 0
    }
}

/// Stored credential record for one account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCredentials {
    pub user_id: UserId,
    pub digest: PasswordDigest,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyUsername)]
    #[case("   ", "pw", LoginValidationError::EmptyUsername)]
    #[case("user", "", LoginValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(username, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn digest_depends_on_user_salt() {
        let a = PasswordDigest::derive(&UserId::random(), "secret");
        let b = PasswordDigest::derive(&UserId::random(), "secret");
        assert!(!a.matches(&b));
    }

    #[rstest]
    fn digest_matches_itself_after_storage() {
        let user = UserId::random();
        let derived = PasswordDigest::derive(&user, "secret");
        let stored = PasswordDigest::from_stored(derived.as_str());
        assert!(stored.matches(&PasswordDigest::derive(&user, "secret")));
        assert!(!stored.matches(&PasswordDigest::derive(&user, "Secret")));
    }
}
