//! Comment HTTP handlers.
//!
//! ```text
//! POST   /api/v1/posts/{post_id}/comments
//! PUT    /api/v1/posts/{post_id}/comments/{comment_id}
//! DELETE /api/v1/posts/{post_id}/comments/{comment_id}
//! ```
//!
//! Unlike posts, touching someone else's comment is refused outright with
//! `403 Forbidden`.

use actix_web::{HttpResponse, delete, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{AddCommentRequest, DeleteCommentRequest, EditCommentRequest};
use crate::domain::{CommentId, PostId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::redirect::RedirectResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, required};

const TEXT: FieldName = FieldName::new("text");

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentRequest {
    #[schema(example = "Lovely photos!")]
    pub text: Option<String>,
}

/// Comment on an existing post.
#[utoipa::path(
    post,
    path = "/api/v1/posts/{post_id}/comments",
    params(("post_id" = i64, Path, description = "Post identifier")),
    request_body = CommentRequest,
    responses(
        (status = 303, description = "See the post", body = RedirectResponse,
            headers(("Location" = String, description = "Next page"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "addComment"
)]
#[post("/posts/{post_id}/comments")]
pub async fn add_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
    payload: web::Json<CommentRequest>,
) -> ApiResult<HttpResponse> {
    let author = session.require_user_id()?;
    let text = required(payload.into_inner().text, TEXT)?;
    let outcome = state
        .comments
        .add_comment(AddCommentRequest {
            post_id: PostId::new(path.into_inner()),
            author,
            text,
        })
        .await?;
    Ok(RedirectResponse::to(&outcome.redirect)
        .with_comment(outcome.comment.id)
        .into_response())
}

/// Rewrite one of your own comments.
#[utoipa::path(
    put,
    path = "/api/v1/posts/{post_id}/comments/{comment_id}",
    params(
        ("post_id" = i64, Path, description = "Post identifier"),
        ("comment_id" = i64, Path, description = "Comment identifier")
    ),
    request_body = CommentRequest,
    responses(
        (status = 303, description = "See the post", body = RedirectResponse,
            headers(("Location" = String, description = "Next page"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not the comment's author", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "editComment"
)]
#[put("/posts/{post_id}/comments/{comment_id}")]
pub async fn edit_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<(i64, i64)>,
    payload: web::Json<CommentRequest>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user_id()?;
    let (post_id, comment_id) = path.into_inner();
    let outcome = state
        .comments
        .edit_comment(EditCommentRequest {
            post_id: PostId::new(post_id),
            comment_id: CommentId::new(comment_id),
            actor,
            text: required(payload.into_inner().text, TEXT),
        })
        .await?;
    Ok(RedirectResponse::to(&outcome.redirect).into_response())
}

/// Remove one of your own comments.
#[utoipa::path(
    delete,
    path = "/api/v1/posts/{post_id}/comments/{comment_id}",
    params(
        ("post_id" = i64, Path, description = "Post identifier"),
        ("comment_id" = i64, Path, description = "Comment identifier")
    ),
    responses(
        (status = 303, description = "See the post", body = RedirectResponse,
            headers(("Location" = String, description = "Next page"))),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not the comment's author", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "deleteComment"
)]
#[delete("/posts/{post_id}/comments/{comment_id}")]
pub async fn delete_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<(i64, i64)>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user_id()?;
    let (post_id, comment_id) = path.into_inner();
    let redirect = state
        .comments
        .delete_comment(DeleteCommentRequest {
            post_id: PostId::new(post_id),
            comment_id: CommentId::new(comment_id),
            actor,
        })
        .await?;
    Ok(RedirectResponse::to(&redirect).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_support::{comment_on, fixed_now, post_by};
    use crate::domain::{CommentOutcome, Error, RedirectTarget, UserId};
    use crate::inbound::http::test_utils::{
        MockPorts, session_cookie, sign_in, test_session_middleware,
    };
    use actix_web::http::StatusCode;
    use actix_web::http::header::LOCATION;
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::{Value, json};

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
                    .service(add_comment)
                    .service(edit_comment)
                    .service(delete_comment),
            )
    }

    fn outcome_for(author: UserId, text: &str) -> CommentOutcome {
        let post = post_by(author, fixed_now());
        let mut comment = comment_on(&post, author, text, fixed_now());
        comment.id = CommentId::new(12);
        CommentOutcome {
            comment,
            redirect: RedirectTarget::PostDetail(post.id),
        }
    }

    #[rstest]
    #[actix_web::test]
    async fn adding_redirects_to_the_post_with_the_new_id() {
        let author = UserId::random();
        let mut ports = MockPorts::default();
        ports
            .comments
            .expect_add_comment()
            .withf(move |request| {
                request.author == author
                    && request.post_id == PostId::new(1)
                    && request.text == "Nice"
            })
            .times(1)
            .returning(move |request| Ok(outcome_for(request.author, &request.text)));
        let app = test::init_service(app(ports)).await;
        let cookie = session_cookie(&app, &author).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/posts/1/comments")
                .cookie(cookie)
                .set_json(json!({"text": "Nice"}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            res.headers()
                .get(LOCATION)
                .and_then(|value| value.to_str().ok()),
            Some("/api/v1/posts/1")
        );
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body, json!({"redirectTo": "/api/v1/posts/1", "commentId": 12}));
    }

    #[rstest]
    #[actix_web::test]
    async fn anonymous_comments_are_unauthorised() {
        let app = test::init_service(app(MockPorts::default())).await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/posts/1/comments")
                .set_json(json!({"text": "Nice"}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[rstest]
    #[actix_web::test]
    async fn missing_text_is_a_validation_error() {
        let author = UserId::random();
        let app = test::init_service(app(MockPorts::default())).await;
        let cookie = session_cookie(&app, &author).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/posts/1/comments")
                .cookie(cookie)
                .set_json(json!({}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["details"]["field"], "text");
    }

    #[rstest]
    #[actix_web::test]
    async fn editing_someone_elses_comment_is_forbidden() {
        let actor = UserId::random();
        let mut ports = MockPorts::default();
        ports
            .comments
            .expect_edit_comment()
            .withf(|request| request.comment_id == CommentId::new(12))
            .times(1)
            .returning(|_| Err(Error::forbidden("not the comment's author")));
        let app = test::init_service(app(ports)).await;
        let cookie = session_cookie(&app, &actor).await;

        let res = test::call_service(
            &app,
            test::TestRequest::put()
                .uri("/api/v1/posts/1/comments/12")
                .cookie(cookie)
                .set_json(json!({"text": "Edited"}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }

    #[rstest]
    #[actix_web::test]
    async fn deleting_redirects_to_the_post() {
        let actor = UserId::random();
        let mut ports = MockPorts::default();
        ports
            .comments
            .expect_delete_comment()
            .withf(move |request| request.actor == actor && request.post_id == PostId::new(1))
            .times(1)
            .returning(|request| Ok(RedirectTarget::PostDetail(request.post_id)));
        let app = test::init_service(app(ports)).await;
        let cookie = session_cookie(&app, &actor).await;

        let res = test::call_service(
            &app,
            test::TestRequest::delete()
                .uri("/api/v1/posts/1/comments/12")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body, json!({"redirectTo": "/api/v1/posts/1"}));
    }
}
