//! HTTP inbound adapter exposing REST endpoints.

pub mod categories;
pub mod comments;
pub mod dto;
pub mod error;
pub mod health;
pub mod posts;
pub mod profiles;
pub mod redirect;
pub mod reference;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;
pub use redirect::API_PREFIX;

/// Register every `/api/v1` handler on a scope.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use blog_backend::inbound::http::{API_PREFIX, api_routes};
///
/// let app = App::new().service(web::scope(API_PREFIX).configure(api_routes));
/// ```
pub fn api_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(users::login)
        .service(users::logout)
        .service(posts::list_posts)
        .service(posts::create_post)
        .service(posts::get_post)
        .service(posts::edit_post)
        .service(posts::delete_post)
        .service(posts::list_comments)
        .service(comments::add_comment)
        .service(comments::edit_comment)
        .service(comments::delete_comment)
        .service(categories::category_posts)
        .service(profiles::edit_profile_form)
        .service(profiles::get_profile)
        .service(profiles::edit_profile)
        .service(reference::list_categories)
        .service(reference::list_locations);
}
