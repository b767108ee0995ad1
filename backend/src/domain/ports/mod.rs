//! Domain ports.
//!
//! Driving ports are the use cases inbound adapters call; driven ports are the
//! Entity Store contracts outbound adapters implement.

use super::macros::define_port_error;

mod category_repository;
mod comment_command;
mod comment_repository;
mod location_repository;
mod login_service;
mod post_command;
mod post_query;
mod post_repository;
mod profile_command;
mod profile_query;
mod reference_data_query;
mod store_error;
mod user_repository;

#[cfg(test)]
pub use category_repository::MockCategoryRepository;
pub use category_repository::CategoryRepository;
#[cfg(test)]
pub use comment_command::MockCommentCommand;
pub use comment_command::{
    AddCommentRequest, CommentCommand, DeleteCommentRequest, EditCommentRequest,
};
#[cfg(test)]
pub use comment_repository::MockCommentRepository;
pub use comment_repository::CommentRepository;
#[cfg(test)]
pub use location_repository::MockLocationRepository;
pub use location_repository::LocationRepository;
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use post_command::MockPostCommand;
pub use post_command::{CreatePostRequest, EditPostRequest, PostCommand};
#[cfg(test)]
pub use post_query::MockPostQuery;
pub use post_query::PostQuery;
#[cfg(test)]
pub use post_repository::MockPostRepository;
pub use post_repository::PostRepository;
#[cfg(test)]
pub use profile_command::MockProfileCommand;
pub use profile_command::{EditProfileRequest, ProfileCommand};
#[cfg(test)]
pub use profile_query::MockProfileQuery;
pub use profile_query::ProfileQuery;
#[cfg(test)]
pub use reference_data_query::MockReferenceDataQuery;
pub use reference_data_query::ReferenceDataQuery;
pub use store_error::StoreError;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::UserRepository;
