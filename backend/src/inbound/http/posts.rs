//! Post HTTP handlers.
//!
//! ```text
//! GET    /api/v1/posts?page=N
//! POST   /api/v1/posts
//! GET    /api/v1/posts/{post_id}
//! PUT    /api/v1/posts/{post_id}
//! DELETE /api/v1/posts/{post_id}
//! GET    /api/v1/posts/{post_id}/comments
//! ```

use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};
use pagination::PageRequest;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{CreatePostRequest, EditPostRequest};
use crate::domain::{
    CategoryId, Error, LocationId, POSTS_PER_PAGE, PostDraft, PostDraftInput, PostId, PostScope,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{CommentResponse, PostDetailResponse, PostListingResponse};
use crate::inbound::http::redirect::RedirectResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_rfc3339_timestamp, required};

const TITLE: FieldName = FieldName::new("title");
const TEXT: FieldName = FieldName::new("text");
const PUB_DATE: FieldName = FieldName::new("pubDate");

/// `?page=N` on listing endpoints. Anything unusable means page 1.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// One-based page number.
    #[param(example = "2")]
    pub page: Option<String>,
}

impl PageQuery {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::parse_lenient(self.page.as_deref(), POSTS_PER_PAGE)
    }
}

/// Body for creating or replacing a post.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostRequest {
    pub title: Option<String>,
    pub text: Option<String>,
    /// Reference to an uploaded image.
    pub image: Option<String>,
    #[schema(example = "2026-05-10T12:00:00Z")]
    pub pub_date: Option<String>,
    /// Defaults to `true`.
    pub is_published: Option<bool>,
    pub location_id: Option<i64>,
    pub category_id: Option<i64>,
}

fn parse_post_request(payload: PostRequest) -> Result<PostDraft, Error> {
    let title = required(payload.title, TITLE)?;
    let text = required(payload.text, TEXT)?;
    let pub_date = parse_rfc3339_timestamp(required(payload.pub_date, PUB_DATE)?, PUB_DATE)?;
    PostDraft::try_from_input(PostDraftInput {
        title,
        text,
        image: payload.image,
        pub_date,
        is_published: payload.is_published.unwrap_or(true),
        location_id: payload.location_id.map(LocationId::new),
        category_id: payload.category_id.map(CategoryId::new),
    })
    .map_err(Error::from)
}

/// Site index: visible posts, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/posts",
    params(PageQuery),
    responses(
        (status = 200, description = "One page of posts", body = PostListingResponse),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "listPosts",
    security([])
)]
#[get("/posts")]
pub async fn list_posts(
    state: web::Data<HttpState>,
    session: SessionContext,
    request: HttpRequest,
    query: web::Query<PageQuery>,
) -> ApiResult<web::Json<PostListingResponse>> {
    let viewer = session.user_id()?;
    let listing = state
        .posts
        .list_posts(PostScope::All, viewer, query.page_request())
        .await?;
    Ok(web::Json(PostListingResponse::new(
        &listing,
        &request.full_url(),
    )))
}

/// Publish a new post as the signed-in user.
#[utoipa::path(
    post,
    path = "/api/v1/posts",
    request_body = PostRequest,
    responses(
        (status = 303, description = "Created; see the author's profile", body = RedirectResponse,
            headers(("Location" = String, description = "Next page"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "createPost"
)]
#[post("/posts")]
pub async fn create_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<PostRequest>,
) -> ApiResult<HttpResponse> {
    let author = session.require_user_id()?;
    let draft = parse_post_request(payload.into_inner())?;
    let created = state
        .post_commands
        .create_post(CreatePostRequest { author, draft })
        .await?;
    Ok(RedirectResponse::to(&created.redirect)
        .with_post(created.post.id)
        .into_response())
}

/// A single post with its comments.
#[utoipa::path(
    get,
    path = "/api/v1/posts/{post_id}",
    params(("post_id" = i64, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Post detail", body = PostDetailResponse),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "getPost",
    security([])
)]
#[get("/posts/{post_id}")]
pub async fn get_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<web::Json<PostDetailResponse>> {
    let viewer = session.user_id()?;
    let detail = state
        .posts
        .get_post(PostId::new(path.into_inner()), viewer)
        .await?;
    Ok(web::Json(PostDetailResponse::from(&detail)))
}

/// Replace a post's content.
///
/// Only the author changes anything; everyone else gets the same redirect
/// to the post.
#[utoipa::path(
    put,
    path = "/api/v1/posts/{post_id}",
    params(("post_id" = i64, Path, description = "Post identifier")),
    request_body = PostRequest,
    responses(
        (status = 303, description = "See the post", body = RedirectResponse,
            headers(("Location" = String, description = "Next page"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "editPost"
)]
#[put("/posts/{post_id}")]
pub async fn edit_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
    payload: web::Json<PostRequest>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user_id()?;
    let outcome = state
        .post_commands
        .edit_post(EditPostRequest {
            post_id: PostId::new(path.into_inner()),
            actor,
            draft: parse_post_request(payload.into_inner()),
        })
        .await?;
    Ok(RedirectResponse::to(outcome.redirect()).into_response())
}

/// Delete a post and its comments.
#[utoipa::path(
    delete,
    path = "/api/v1/posts/{post_id}",
    params(("post_id" = i64, Path, description = "Post identifier")),
    responses(
        (status = 303, description = "See the index, or the post when nothing changed",
            body = RedirectResponse, headers(("Location" = String, description = "Next page"))),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "deletePost"
)]
#[delete("/posts/{post_id}")]
pub async fn delete_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user_id()?;
    let outcome = state
        .post_commands
        .delete_post(PostId::new(path.into_inner()), actor)
        .await?;
    Ok(RedirectResponse::to(outcome.redirect()).into_response())
}

/// Comments on a visible post, oldest first.
#[utoipa::path(
    get,
    path = "/api/v1/posts/{post_id}/comments",
    params(("post_id" = i64, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Comments", body = [CommentResponse]),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "listComments",
    security([])
)]
#[get("/posts/{post_id}/comments")]
pub async fn list_comments(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<web::Json<Vec<CommentResponse>>> {
    let viewer = session.user_id()?;
    let comments = state
        .posts
        .list_comments(PostId::new(path.into_inner()), viewer)
        .await?;
    Ok(web::Json(comments.iter().map(CommentResponse::from).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_support::{fixed_now, post_by};
    use crate::domain::{
        CreatedPost, ErrorCode, ListingSubject, MutationOutcome, PostListing, RedirectTarget,
        UserId, Username,
    };
    use crate::inbound::http::test_utils::{
        MockPorts, session_cookie, sign_in, test_session_middleware,
    };
    use actix_web::http::StatusCode;
    use actix_web::http::header::LOCATION;
    use actix_web::App;
    use actix_web::test as actix_test;
    use pagination::Page;
    use rstest::rstest;
    use serde_json::{Value, json};

    fn valid_body() -> PostRequest {
        PostRequest {
            title: Some("Hello".into()),
            text: Some("First post".into()),
            pub_date: Some("2026-05-10T12:00:00Z".into()),
            ..PostRequest::default()
        }
    }

    fn app(
        ports: MockPorts,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(ports.into_state())
            .wrap(test_session_middleware())
            .route("/test-login/{id}", web::get().to(sign_in))
            .service(
                web::scope("/api/v1")
                    .service(list_posts)
                    .service(create_post)
                    .service(get_post)
                    .service(edit_post)
                    .service(delete_post)
                    .service(list_comments),
            )
    }

    fn location(res: &actix_web::dev::ServiceResponse) -> Option<&str> {
        res.headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
    }

    #[rstest]
    fn post_request_defaults_to_published() {
        let draft = parse_post_request(valid_body()).expect("valid draft");
        assert!(draft.is_published());
        assert_eq!(draft.pub_date(), fixed_now());
    }

    #[rstest]
    #[case(PostRequest { title: None, ..valid_body() }, "title")]
    #[case(PostRequest { text: None, ..valid_body() }, "text")]
    #[case(PostRequest { pub_date: None, ..valid_body() }, "pubDate")]
    #[case(PostRequest { pub_date: Some("soon".into()), ..valid_body() }, "pubDate")]
    fn post_request_reports_the_offending_field(#[case] body: PostRequest, #[case] field: &str) {
        let err = parse_post_request(body).expect_err("invalid body");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            err.details().and_then(|d| d.get("field")),
            Some(&json!(field))
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn listing_parses_the_page_leniently_and_links_from_the_request() {
        let mut ports = MockPorts::default();
        ports
            .posts
            .expect_list_posts()
            .withf(|scope, viewer, page| {
                *scope == PostScope::All && viewer.is_none() && page.number() == 1
            })
            .times(1)
            .returning(|_, _, page| {
                Ok(PostListing {
                    subject: ListingSubject::Site,
                    page: Page::new(Vec::new(), page, 0),
                })
            });
        let app = actix_test::init_service(app(ports)).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/posts?page=abc")
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["items"], json!([]));
        assert_eq!(body["page"]["hasNext"], false);
        assert_eq!(body["links"]["self"], "http://localhost:8080/api/v1/posts?page=1");
    }

    #[rstest]
    #[actix_web::test]
    async fn creating_requires_a_session() {
        let app = actix_test::init_service(app(MockPorts::default())).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/posts")
                .set_json(valid_body())
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[rstest]
    #[actix_web::test]
    async fn creating_redirects_to_the_author_profile() {
        let author = UserId::random();
        let mut ports = MockPorts::default();
        ports
            .post_commands
            .expect_create_post()
            .withf(move |request| request.author == author && request.draft.title() == "Hello")
            .times(1)
            .returning(move |request| {
                let mut post = post_by(request.author, request.draft.pub_date());
                post.id = PostId::new(41);
                Ok(CreatedPost {
                    post,
                    redirect: RedirectTarget::Profile(
                        Username::new("ada").expect("valid username"),
                    ),
                })
            });
        let app = actix_test::init_service(app(ports)).await;
        let cookie = session_cookie(&app, &author).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/posts")
                .cookie(cookie)
                .set_json(valid_body())
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&res), Some("/api/v1/profile/ada"));
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body, json!({"redirectTo": "/api/v1/profile/ada", "postId": 41}));
    }

    #[rstest]
    #[case(MutationOutcome::Applied(RedirectTarget::PostDetail(PostId::new(5))))]
    #[case(MutationOutcome::Denied(RedirectTarget::PostDetail(PostId::new(5))))]
    #[actix_web::test]
    async fn edits_answer_identically_whether_applied_or_denied(#[case] outcome: MutationOutcome) {
        let actor = UserId::random();
        let mut ports = MockPorts::default();
        ports
            .post_commands
            .expect_edit_post()
            .withf(move |request| request.actor == actor && request.post_id == PostId::new(5))
            .times(1)
            .return_once(move |_| Ok(outcome));
        let app = actix_test::init_service(app(ports)).await;
        let cookie = session_cookie(&app, &actor).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri("/api/v1/posts/5")
                .cookie(cookie)
                .set_json(valid_body())
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&res), Some("/api/v1/posts/5"));
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body, json!({"redirectTo": "/api/v1/posts/5"}));
    }

    #[rstest]
    #[actix_web::test]
    async fn incomplete_edits_reach_the_ownership_check() {
        let actor = UserId::random();
        let mut ports = MockPorts::default();
        ports
            .post_commands
            .expect_edit_post()
            .withf(|request| request.draft.is_err())
            .times(1)
            .returning(|request| {
                Ok(MutationOutcome::Denied(RedirectTarget::PostDetail(
                    request.post_id,
                )))
            });
        let app = actix_test::init_service(app(ports)).await;
        let cookie = session_cookie(&app, &actor).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri("/api/v1/posts/5")
                .cookie(cookie)
                .set_json(json!({"title": "Hijacked"}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&res), Some("/api/v1/posts/5"));
    }

    #[rstest]
    #[actix_web::test]
    async fn deleting_redirects_to_the_index() {
        let actor = UserId::random();
        let mut ports = MockPorts::default();
        ports
            .post_commands
            .expect_delete_post()
            .times(1)
            .returning(|_, _| Ok(MutationOutcome::Applied(RedirectTarget::Index)));
        let app = actix_test::init_service(app(ports)).await;
        let cookie = session_cookie(&app, &actor).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete()
                .uri("/api/v1/posts/5")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&res), Some("/api/v1/posts"));
    }

    #[rstest]
    #[actix_web::test]
    async fn hidden_posts_are_not_found() {
        let mut ports = MockPorts::default();
        ports
            .posts
            .expect_get_post()
            .returning(|_, _| Err(Error::not_found("post not found")));
        let app = actix_test::init_service(app(ports)).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/api/v1/posts/9").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[rstest]
    #[actix_web::test]
    async fn signed_in_viewers_are_passed_to_reads() {
        let viewer = UserId::random();
        let mut ports = MockPorts::default();
        ports
            .posts
            .expect_list_comments()
            .withf(move |post_id, seen| *post_id == PostId::new(3) && *seen == Some(viewer))
            .times(1)
            .returning(|_, _| Ok(Vec::new()));
        let app = actix_test::init_service(app(ports)).await;
        let cookie = session_cookie(&app, &viewer).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/posts/3/comments")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
    }
}
