//! Profile HTTP handlers.
//!
//! ```text
//! GET /api/v1/profile/{username}?page=N
//! GET /api/v1/profile/{username}/edit
//! PUT /api/v1/profile/{username}
//! ```

use actix_web::{HttpRequest, HttpResponse, get, put, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::domain::ports::EditProfileRequest;
use crate::domain::{Error, ProfileEdit, ProfileEditInput};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{PostListingResponse, ProfileResponse};
use crate::inbound::http::posts::PageQuery;
use crate::inbound::http::redirect::RedirectResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, required, username_from_path};

const USERNAME: FieldName = FieldName::new("username");
const EMAIL: FieldName = FieldName::new("email");

/// Replacement profile fields. Omitted names are cleared.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRequest {
    #[schema(example = "ada")]
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[schema(example = "ada@example.org")]
    pub email: Option<String>,
}

fn parse_profile_request(payload: ProfileRequest) -> Result<ProfileEdit, Error> {
    let username = required(payload.username, USERNAME)?;
    let email = required(payload.email, EMAIL)?;
    ProfileEdit::try_from_input(ProfileEditInput {
        username,
        first_name: payload.first_name.unwrap_or_default(),
        last_name: payload.last_name.unwrap_or_default(),
        email,
    })
    .map_err(Error::from)
}

/// An author's public card and their posts.
///
/// The author sees every post they wrote; everyone else sees only what is
/// published and due.
#[utoipa::path(
    get,
    path = "/api/v1/profile/{username}",
    params(
        ("username" = String, Path, description = "Author's username"),
        PageQuery
    ),
    responses(
        (status = 200, description = "One page of the author's posts", body = PostListingResponse),
        (status = 404, description = "Unknown user", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["profiles"],
    operation_id = "getProfile",
    security([])
)]
#[get("/profile/{username}")]
pub async fn get_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
    request: HttpRequest,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> ApiResult<web::Json<PostListingResponse>> {
    let username = username_from_path(path.into_inner())?;
    let viewer = session.user_id()?;
    let listing = state
        .profiles
        .get_profile(username, viewer, query.page_request())
        .await?;
    Ok(web::Json(PostListingResponse::new(
        &listing,
        &request.full_url(),
    )))
}

/// Current values for the signed-in user's profile form.
#[utoipa::path(
    get,
    path = "/api/v1/profile/{username}/edit",
    params(("username" = String, Path, description = "Signed-in user's username")),
    responses(
        (status = 200, description = "Editable profile", body = ProfileResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Someone else's profile", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["profiles"],
    operation_id = "getProfileForEdit"
)]
#[get("/profile/{username}/edit")]
pub async fn edit_profile_form(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<ProfileResponse>> {
    let actor = session.require_user_id()?;
    let target = username_from_path(path.into_inner())?;
    let profile = state.profiles.fetch_own_profile(actor).await?;
    if profile.username != target {
        info!(%actor, %target, "profile form requested for another user");
        return Err(Error::forbidden("you may only edit your own profile"));
    }
    Ok(web::Json(ProfileResponse::from(&profile)))
}

/// Update the signed-in user's profile and account name.
#[utoipa::path(
    put,
    path = "/api/v1/profile/{username}",
    params(("username" = String, Path, description = "Signed-in user's username")),
    request_body = ProfileRequest,
    responses(
        (status = 303, description = "See the index", body = RedirectResponse,
            headers(("Location" = String, description = "Next page"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Someone else's profile", body = ErrorSchema),
        (status = 409, description = "Username taken", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["profiles"],
    operation_id = "editProfile"
)]
#[put("/profile/{username}")]
pub async fn edit_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<ProfileRequest>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user_id()?;
    let target = username_from_path(path.into_inner())?;
    let edit = parse_profile_request(payload.into_inner())?;
    let redirect = state
        .profile_commands
        .edit_profile(EditProfileRequest {
            actor,
            target,
            edit,
        })
        .await?;
    Ok(RedirectResponse::to(&redirect).into_response())
}
