//! Domain primitives, policies and services.
//!
//! Purpose: model the blog's entities (posts, comments, categories,
//! locations, profiles) and the rules deciding who may see or change them.
//! Nothing here depends on actix-web or Diesel; adapters talk to the domain
//! through the traits in [`ports`].
//!
//! Public surface:
//! - Entities: [`Post`], [`Comment`], [`Category`], [`Location`], [`User`],
//!   [`Profile`] and their validated inputs.
//! - Policies: [`policy::is_visible`] and [`policy::can_mutate`].
//! - Listing pipeline types: [`PostScope`], [`PostListQuery`], [`PostListing`].
//! - Services implementing the driving ports.
//! - [`Error`] / [`ErrorCode`]: transport-agnostic failures.

pub(crate) mod macros;

pub mod auth;
pub mod category;
pub mod comment;
pub mod comment_service;
pub mod error;
pub mod listing;
pub mod location;
pub mod login_service;
pub mod outcome;
pub mod policy;
pub mod ports;
pub mod post;
pub mod post_service;
pub mod profile;
pub mod profile_service;
pub mod reference_data_service;
pub mod trace_id;
pub mod user;

#[cfg(test)]
pub(crate) mod test_support;

pub use self::auth::{LoginCredentials, LoginValidationError, PasswordDigest, StoredCredentials};
pub use self::category::{Category, CategoryId, CategorySlug, SlugValidationError};
pub use self::comment::{Comment, CommentId, CommentText, CommentValidationError, NewComment};
pub use self::comment_service::CommentService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::listing::{
    ListingSubject, POSTS_PER_PAGE, PostListQuery, PostListing, PostScope, PostSlice,
    VisibilityRule,
};
pub use self::location::{Location, LocationId};
pub use self::login_service::StoreLoginService;
pub use self::outcome::{CommentOutcome, CreatedPost, MutationOutcome, RedirectTarget};
pub use self::post::{
    NewPost, POST_TITLE_MAX, Post, PostDetail, PostDraft, PostDraftInput, PostId, PostSummary,
    PostValidationError,
};
pub use self::post_service::{PostCommandService, PostQueryService};
pub use self::profile::{Profile, ProfileEdit, ProfileEditInput, ProfileValidationError};
pub use self::profile_service::ProfileService;
pub use self::reference_data_service::ReferenceDataService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{User, UserId, UserValidationError, Username};
