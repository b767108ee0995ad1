//! JSON representations of blog entities and listing envelopes.
//!
//! Domain types stay free of serde and OpenAPI concerns; these wrappers are
//! what clients see.

use pagination::{PageLinks, PageMeta};
use serde::Serialize;
use url::Url;
use utoipa::ToSchema;

use crate::domain::{
    Category, Comment, ListingSubject, Location, PostDetail, PostListing, PostSummary, Profile,
    User,
};

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    #[schema(example = "travel")]
    pub slug: String,
}

impl From<&Category> for CategoryResponse {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id.get(),
            title: category.title.clone(),
            description: category.description.clone(),
            slug: category.slug.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocationResponse {
    pub id: i64,
    pub title: String,
}

impl From<&Location> for LocationResponse {
    fn from(location: &Location) -> Self {
        Self {
            id: location.id.get(),
            title: location.title.clone(),
        }
    }
}

/// A post with its author, references and comment count.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostSummaryResponse {
    pub id: i64,
    pub title: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[schema(example = "2026-05-10T12:00:00+00:00")]
    pub pub_date: String,
    pub is_published: bool,
    /// Username of the author.
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<LocationResponse>,
    pub comment_count: u64,
    pub created_at: String,
}

impl From<&PostSummary> for PostSummaryResponse {
    fn from(summary: &PostSummary) -> Self {
        let post = &summary.post;
        Self {
            id: post.id.get(),
            title: post.title.clone(),
            text: post.text.clone(),
            image: post.image.clone(),
            pub_date: post.pub_date.to_rfc3339(),
            is_published: post.is_published,
            author: post.author_username.to_string(),
            category: post.category.as_ref().map(CategoryResponse::from),
            location: post.location.as_ref().map(LocationResponse::from),
            comment_count: summary.comment_count,
            created_at: post.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: i64,
    pub post_id: i64,
    pub text: String,
    /// Username of the author.
    pub author: String,
    pub created_at: String,
}

impl From<&Comment> for CommentResponse {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id.get(),
            post_id: comment.post_id.get(),
            text: comment.text.clone(),
            author: comment.author_username.to_string(),
            created_at: comment.created_at.to_rfc3339(),
        }
    }
}

/// A post plus its comments, oldest first.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostDetailResponse {
    #[serde(flatten)]
    pub post: PostSummaryResponse,
    pub comments: Vec<CommentResponse>,
}

impl From<&PostDetail> for PostDetailResponse {
    fn from(detail: &PostDetail) -> Self {
        Self {
            post: PostSummaryResponse::from(&detail.summary),
            comments: detail.comments.iter().map(CommentResponse::from).collect(),
        }
    }
}

/// Public card shown above an author's listing.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthorCardResponse {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<&User> for AuthorCardResponse {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.to_string(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageMetaResponse {
    pub number: u32,
    pub page_size: u32,
    pub total_items: u64,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl From<PageMeta> for PageMetaResponse {
    fn from(meta: PageMeta) -> Self {
        Self {
            number: meta.number,
            page_size: meta.page_size,
            total_items: meta.total_items,
            total_pages: meta.total_pages,
            has_next: meta.has_next,
            has_previous: meta.has_previous,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PageLinksResponse {
    #[serde(rename = "self")]
    pub self_link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
}

impl From<PageLinks> for PageLinksResponse {
    fn from(links: PageLinks) -> Self {
        Self {
            self_link: links.self_link,
            next: links.next,
            prev: links.prev,
        }
    }
}

/// One page of posts with navigation.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostListingResponse {
    pub items: Vec<PostSummaryResponse>,
    pub page: PageMetaResponse,
    pub links: PageLinksResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<AuthorCardResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryResponse>,
}

impl PostListingResponse {
    /// Render a listing; `base` is the request URL the links are derived from.
    pub fn new(listing: &PostListing, base: &Url) -> Self {
        let meta = listing.page.meta();
        let (author, category) = match &listing.subject {
            ListingSubject::Site => (None, None),
            ListingSubject::Author(user) => (Some(AuthorCardResponse::from(user)), None),
            ListingSubject::Category(category) => (None, Some(CategoryResponse::from(category))),
        };
        Self {
            items: listing
                .page
                .items()
                .iter()
                .map(PostSummaryResponse::from)
                .collect(),
            page: PageMetaResponse::from(meta),
            links: PageLinksResponse::from(PageLinks::for_page(base, &meta)),
            author,
            category,
        }
    }
}

/// Editable profile fields of the signed-in user.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<&Profile> for ProfileResponse {
    fn from(profile: &Profile) -> Self {
        Self {
            username: profile.username.to_string(),
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            email: profile.email.clone(),
        }
    }
}
