//! Public pages of the blog.

use actix_web::{HttpResponse, web};

use blog_core::domain::PostStatus;
use blog_shared::dto::PublicPostResponse;

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /blog/{slug}/
///
/// Drafts are not public and answer 404 like a missing slug.
pub async fn post_detail(
    state: web::Data<AppState>,
    slug: web::Path<String>,
) -> AppResult<HttpResponse> {
    let slug = slug.into_inner();
    let post = state
        .posts
        .find_by_slug(&slug)
        .await?
        .filter(|p| p.status == PostStatus::Published)
        .ok_or_else(|| AppError::NotFound(format!("No post found for slug {slug:?}")))?;

    let author = state
        .users
        .find_by_id(post.author_id)
        .await?
        .map(|u| u.username)
        .unwrap_or_default();
    let url = post.absolute_url(state.urls.as_ref())?;

    Ok(HttpResponse::Ok().json(PublicPostResponse {
        title: post.title,
        slug: post.slug,
        url,
        content: post.content,
        excerpt: post.excerpt,
        featured_image: post.featured_image,
        author,
        created_date: post.created_date,
        updated_date: post.updated_date,
    }))
}
