//! `303 See Other` responses for mutating endpoints.
//!
//! Every mutation, including a silently denied one, answers with a
//! `Location` header and a small JSON body naming the same path.

use actix_web::HttpResponse;
use actix_web::http::header::LOCATION;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{CommentId, PostId, RedirectTarget};

pub const API_PREFIX: &str = "/api/v1";

/// API path a redirect target resolves to.
#[must_use]
pub fn redirect_path(target: &RedirectTarget) -> String {
    match target {
        RedirectTarget::Index => format!("{API_PREFIX}/posts"),
        RedirectTarget::PostDetail(id) => format!("{API_PREFIX}/posts/{id}"),
        RedirectTarget::Profile(username) => format!("{API_PREFIX}/profile/{username}"),
    }
}

/// Body of a mutation response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RedirectResponse {
    #[schema(example = "/api/v1/posts/42")]
    pub redirect_to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_id: Option<i64>,
}

impl RedirectResponse {
    pub fn to(target: &RedirectTarget) -> Self {
        Self {
            redirect_to: redirect_path(target),
            post_id: None,
            comment_id: None,
        }
    }

    #[must_use]
    pub fn with_post(mut self, id: PostId) -> Self {
        self.post_id = Some(id.get());
        self
    }

    #[must_use]
    pub fn with_comment(mut self, id: CommentId) -> Self {
        self.comment_id = Some(id.get());
        self
    }

    pub fn into_response(self) -> HttpResponse {
        HttpResponse::SeeOther()
            .insert_header((LOCATION, self.redirect_to.clone()))
            .json(self)
    }
}
