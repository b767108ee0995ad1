//! Editable personal details shown on a user's profile page.

use std::fmt;

use serde_json::json;

use super::{Error, User, UserId, UserValidationError, Username};

/// Maximum length of first and last names.
pub const PERSON_NAME_MAX: usize = 30;
/// Maximum length of an email address.
pub const EMAIL_MAX: usize = 254;

/// Profile details of one user. The username mirrors the account record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub user_id: UserId,
    pub username: Username,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<&User> for Profile {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
        }
    }
}

/// Field-level profile validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileValidationError {
    Username(UserValidationError),
    FirstNameTooLong { max: usize },
    LastNameTooLong { max: usize },
    InvalidEmail,
}

impl ProfileValidationError {
    /// Request field the failure refers to.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::Username(_) => "username",
            Self::FirstNameTooLong { .. } => "firstName",
            Self::LastNameTooLong { .. } => "lastName",
            Self::InvalidEmail => "email",
        }
    }

    /// Machine-readable failure code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Username(UserValidationError::EmptyUsername) => "empty_username",
            Self::Username(UserValidationError::UsernameTooLong { .. }) => "username_too_long",
            Self::Username(_) => "invalid_username",
            Self::FirstNameTooLong { .. } | Self::LastNameTooLong { .. } => "name_too_long",
            Self::InvalidEmail => "invalid_email",
        }
    }
}

impl fmt::Display for ProfileValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Username(inner) => fmt::Display::fmt(inner, f),
            Self::FirstNameTooLong { max } => {
                write!(f, "first name must be at most {max} characters")
            }
            Self::LastNameTooLong { max } => {
                write!(f, "last name must be at most {max} characters")
            }
            Self::InvalidEmail => write!(f, "email must be a valid address"),
        }
    }
}

impl std::error::Error for ProfileValidationError {}

impl From<ProfileValidationError> for Error {
    fn from(err: ProfileValidationError) -> Self {
        Error::invalid_request(err.to_string())
            .with_details(json!({ "field": err.field(), "code": err.code() }))
    }
}

/// Raw profile fields as submitted by a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileEditInput {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Validated profile changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileEdit {
    username: Username,
    first_name: String,
    last_name: String,
    email: String,
}

impl ProfileEdit {
    /// Validate raw input. Names are trimmed and may be blank.
    pub fn try_from_input(input: ProfileEditInput) -> Result<Self, ProfileValidationError> {
        let username =
            Username::new(input.username.trim()).map_err(ProfileValidationError::Username)?;
        let first_name = input.first_name.trim().to_owned();
        if first_name.chars().count() > PERSON_NAME_MAX {
            return Err(ProfileValidationError::FirstNameTooLong {
                max: PERSON_NAME_MAX,
            });
        }
        let last_name = input.last_name.trim().to_owned();
        if last_name.chars().count() > PERSON_NAME_MAX {
            return Err(ProfileValidationError::LastNameTooLong {
                max: PERSON_NAME_MAX,
            });
        }
        let email = input.email.trim().to_owned();
        if !looks_like_email(&email) {
            return Err(ProfileValidationError::InvalidEmail);
        }
        Ok(Self {
            username,
            first_name,
            last_name,
            email,
        })
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Apply the edit to the profile of `user_id`.
    #[must_use]
    pub fn into_profile(self, user_id: UserId) -> Profile {
        Profile {
            user_id,
            username: self.username,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
        }
    }
}

fn looks_like_email(value: &str) -> bool {
    if value.chars().count() > EMAIL_MAX || value.chars().any(char::is_whitespace) {
        return false;
    }
    match value.rsplit_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && domain.contains('.')
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn input() -> ProfileEditInput {
        ProfileEditInput {
            username: " writer ".into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.org".into(),
        }
    }

    #[rstest]
    fn valid_input_is_trimmed(input: ProfileEditInput) {
        let edit = ProfileEdit::try_from_input(input).expect("valid edit");
        let profile = edit.into_profile(UserId::random());
        assert_eq!(profile.username.as_str(), "writer");
        assert_eq!(profile.first_name, "Ada");
    }

    #[rstest]
    #[case::bad_username(
        ProfileEditInput { username: "two words".into(), ..input() },
        "username"
    )]
    #[case::long_first_name(
        ProfileEditInput { first_name: "a".repeat(PERSON_NAME_MAX + 1), ..input() },
        "firstName"
    )]
    #[case::long_last_name(
        ProfileEditInput { last_name: "b".repeat(PERSON_NAME_MAX + 1), ..input() },
        "lastName"
    )]
    #[case::missing_at(ProfileEditInput { email: "ada.example.org".into(), ..input() }, "email")]
    #[case::no_domain_dot(ProfileEditInput { email: "ada@localhost".into(), ..input() }, "email")]
    fn invalid_fields_are_reported(#[case] input: ProfileEditInput, #[case] field: &str) {
        let err = ProfileEdit::try_from_input(input).expect_err("invalid edit");
        assert_eq!(err.field(), field);
    }
}
