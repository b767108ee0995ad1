//! Category listing handler.
//!
//! ```text
//! GET /api/v1/category/{slug}?page=N
//! ```

use actix_web::{HttpRequest, get, web};

use crate::domain::PostScope;
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::PostListingResponse;
use crate::inbound::http::posts::PageQuery;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::slug_from_path;

/// Visible posts filed under a published category.
#[utoipa::path(
    get,
    path = "/api/v1/category/{slug}",
    params(
        ("slug" = String, Path, description = "Category slug"),
        PageQuery
    ),
    responses(
        (status = 200, description = "One page of the category's posts", body = PostListingResponse),
        (status = 404, description = "Unknown or unpublished category", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "listCategoryPosts",
    security([])
)]
#[get("/category/{slug}")]
pub async fn category_posts(
    state: web::Data<HttpState>,
    session: SessionContext,
    request: HttpRequest,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> ApiResult<web::Json<PostListingResponse>> {
    let slug = slug_from_path(path.into_inner())?;
    let viewer = session.user_id()?;
    let listing = state
        .posts
        .list_posts(PostScope::ByCategory(slug), viewer, query.page_request())
        .await?;
    Ok(web::Json(PostListingResponse::new(
        &listing,
        &request.full_url(),
    )))
}
