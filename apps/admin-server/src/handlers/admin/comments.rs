//! Comment admin: moderation list, change form and bulk approval.

use actix_web::{HttpResponse, web};
use chrono::Utc;
use uuid::Uuid;

use blog_core::admin::ActionKind;
use blog_core::domain::Comment;
use blog_shared::ApiResponse;
use blog_shared::dto::{ActionRequest, CommentForm};

use super::views::{ChangeFormView, changelist_view};
use super::{action_done, not_found, requested_action};
use crate::middleware::auth::StaffIdentity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /admin/api/comments
pub async fn changelist(
    state: web::Data<AppState>,
    _staff: StaffIdentity,
    params: web::Query<Vec<(String, String)>>,
) -> AppResult<HttpResponse> {
    let admin = &state.admin.comments;
    let query = admin.parse_query(&params.into_inner(), Utc::now())?;
    let list = state.comments.changelist(&query).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(changelist_view(admin, &query, list, None))))
}

/// GET /admin/api/comments/add
pub async fn add_form(state: web::Data<AppState>, _staff: StaffIdentity) -> HttpResponse {
    let admin = &state.admin.comments;
    HttpResponse::Ok().json(ApiResponse::ok(ChangeFormView {
        model: admin.model_name,
        id: None,
        display: None,
        view_on_site: None,
        form: admin.add_form(),
    }))
}

/// GET /admin/api/comments/{id}
pub async fn detail(
    state: web::Data<AppState>,
    _staff: StaffIdentity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let comment = state
        .comments
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found("Comment", id))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(change_form_view(&state, &comment).await?)))
}

/// POST /admin/api/comments
pub async fn create(
    state: web::Data<AppState>,
    staff: StaffIdentity,
    body: web::Json<CommentForm>,
) -> AppResult<HttpResponse> {
    let form = body.into_inner();

    let mut comment = Comment::new(form.post, form.author, form.content);
    comment.is_approved = form.is_approved;
    comment.validate()?;

    let comment = state.comments.create(comment).await?;
    tracing::info!(comment_id = %comment.id, post_id = %comment.post_id, user = %staff.0.username, "Comment added");

    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(
        change_form_view(&state, &comment).await?,
        "The comment was added successfully.",
    )))
}

/// PUT /admin/api/comments/{id}
pub async fn update(
    state: web::Data<AppState>,
    staff: StaffIdentity,
    path: web::Path<Uuid>,
    body: web::Json<CommentForm>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let form = body.into_inner();

    let mut comment = state
        .comments
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found("Comment", id))?;
    comment.post_id = form.post;
    comment.author_id = form.author;
    comment.content = form.content;
    comment.is_approved = form.is_approved;
    comment.validate()?;

    let comment = state.comments.update(comment).await?;
    tracing::info!(comment_id = %comment.id, approved = comment.is_approved, user = %staff.0.username, "Comment changed");

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        change_form_view(&state, &comment).await?,
        "The comment was changed successfully.",
    )))
}

/// DELETE /admin/api/comments/{id}
pub async fn delete(
    state: web::Data<AppState>,
    staff: StaffIdentity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    state.comments.delete(id).await?;
    tracing::info!(comment_id = %id, user = %staff.0.username, "Comment deleted");
    Ok(HttpResponse::NoContent().finish())
}

/// POST /admin/api/comments/actions
pub async fn run_action(
    state: web::Data<AppState>,
    staff: StaffIdentity,
    body: web::Json<ActionRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let admin = &state.admin.comments;
    let action = requested_action(admin, &req)?;

    let affected = match action {
        ActionKind::DeleteSelected => state.comments.delete_many(&req.selected).await?,
        ActionKind::ApproveComments => state.comments.approve(&req.selected).await?,
    };

    Ok(action_done(admin, &staff, action, affected))
}

async fn change_form_view(state: &AppState, comment: &Comment) -> AppResult<ChangeFormView> {
    let admin = &state.admin.comments;
    let author = state.users.find_by_id(comment.author_id).await?;
    let post = state.posts.find_by_id(comment.post_id).await?;

    let display = match (author, post) {
        (Some(author), Some(post)) => Some(Comment::describe(&author.username, &post.title)),
        _ => None,
    };

    Ok(ChangeFormView {
        model: admin.model_name,
        id: Some(comment.id),
        display,
        view_on_site: None,
        form: admin.change_form(comment),
    })
}
