//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every `/api/v1` handler, the health probes, the
//! request and response bodies, and the session cookie security scheme. The
//! document backs Swagger UI in debug builds and `cargo run --bin
//! openapi-dump` for external tooling.

use crate::inbound::http::comments::CommentRequest;
use crate::inbound::http::dto::{
    AuthorCardResponse, CategoryResponse, CommentResponse, LocationResponse, PageLinksResponse,
    PageMetaResponse, PostDetailResponse, PostListingResponse, PostSummaryResponse,
    ProfileResponse,
};
use crate::inbound::http::posts::PostRequest;
use crate::inbound::http::profiles::ProfileRequest;
use crate::inbound::http::redirect::RedirectResponse;
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::users::LoginRequest;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Blog backend API",
        description = "Posts, comments, categories and author profiles behind cookie sessions.",
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::posts::list_posts,
        crate::inbound::http::posts::create_post,
        crate::inbound::http::posts::get_post,
        crate::inbound::http::posts::edit_post,
        crate::inbound::http::posts::delete_post,
        crate::inbound::http::posts::list_comments,
        crate::inbound::http::comments::add_comment,
        crate::inbound::http::comments::edit_comment,
        crate::inbound::http::comments::delete_comment,
        crate::inbound::http::categories::category_posts,
        crate::inbound::http::profiles::get_profile,
        crate::inbound::http::profiles::edit_profile_form,
        crate::inbound::http::profiles::edit_profile,
        crate::inbound::http::reference::list_categories,
        crate::inbound::http::reference::list_locations,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        LoginRequest,
        PostRequest,
        CommentRequest,
        ProfileRequest,
        RedirectResponse,
        PostSummaryResponse,
        PostDetailResponse,
        PostListingResponse,
        PageMetaResponse,
        PageLinksResponse,
        AuthorCardResponse,
        CategoryResponse,
        LocationResponse,
        CommentResponse,
        ProfileResponse,
    )),
    tags(
        (name = "users", description = "Session login and logout"),
        (name = "posts", description = "Post listings and post management"),
        (name = "comments", description = "Comments on posts"),
        (name = "profiles", description = "Author pages and profile editing"),
        (name = "reference", description = "Categories and locations for post forms"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
