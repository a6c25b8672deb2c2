//! Post admin: change list, add/change forms with inline comments, actions.

use actix_web::{HttpResponse, web};
use chrono::Utc;
use uuid::Uuid;

use blog_core::admin::{
    ActionKind, CommentField, InlineChange, ModelAdmin, PostField, render_inline,
    validate_inlines,
};
use blog_core::domain::{Comment, Post, PostStatus, SLUG_MAX_LEN, slugify};
use blog_core::error::{DomainError, FieldError};
use blog_shared::ApiResponse;
use blog_shared::dto::{ActionRequest, InlineCommentForm, PostForm};

use super::views::{ChangeFormView, changelist_view};
use super::{action_done, into_result, not_found, requested_action};
use crate::middleware::auth::StaffIdentity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /admin/api/posts
pub async fn changelist(
    state: web::Data<AppState>,
    _staff: StaffIdentity,
    params: web::Query<Vec<(String, String)>>,
) -> AppResult<HttpResponse> {
    let admin = &state.admin.posts;
    let query = admin.parse_query(&params.into_inner(), Utc::now())?;

    let list = state.posts.changelist(&query).await?;
    let hierarchy = state.posts.date_hierarchy(&query).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(changelist_view(
        admin,
        &query,
        list,
        Some(hierarchy),
    ))))
}

/// GET /admin/api/posts/add
pub async fn add_form(state: web::Data<AppState>, _staff: StaffIdentity) -> HttpResponse {
    let admin = &state.admin.posts;
    HttpResponse::Ok().json(ApiResponse::ok(ChangeFormView {
        model: admin.model_name,
        id: None,
        display: None,
        view_on_site: None,
        form: admin.add_form(),
    }))
}

/// GET /admin/api/posts/{id}
pub async fn detail(
    state: web::Data<AppState>,
    _staff: StaffIdentity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found("Post", id))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(change_form_view(&state, &post).await?)))
}

/// POST /admin/api/posts
pub async fn create(
    state: web::Data<AppState>,
    staff: StaffIdentity,
    body: web::Json<PostForm>,
) -> AppResult<HttpResponse> {
    let form = body.into_inner();
    let admin = &state.admin.posts;

    let mut post = Post::new(form.author, String::new(), String::new(), String::new());
    let mut errors = apply_form(admin, &mut post, &form);

    let changes = inline_changes(post.id, &form.comments, &[], &mut errors);
    collect(&mut errors, validate_inlines(post.id, &changes, &[]));
    into_result(errors)?;

    let post = state.posts.save_with_inlines(post, true, changes).await?;
    tracing::info!(post_id = %post.id, slug = %post.slug, user = %staff.0.username, "Post added");

    let message = format!("The post \"{}\" was added successfully.", post.title);
    let view = change_form_view(&state, &post).await?;
    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(view, message)))
}

/// PUT /admin/api/posts/{id}
///
/// Concurrent edits are not detected; the last save wins.
pub async fn update(
    state: web::Data<AppState>,
    staff: StaffIdentity,
    path: web::Path<Uuid>,
    body: web::Json<PostForm>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let form = body.into_inner();
    let admin = &state.admin.posts;

    let mut post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found("Post", id))?;
    let mut errors = apply_form(admin, &mut post, &form);
    post.touch();

    let existing = state.comments.find_by_post(id).await?;
    let changes = inline_changes(id, &form.comments, &existing, &mut errors);
    collect(&mut errors, validate_inlines(id, &changes, &existing));
    into_result(errors)?;

    let post = state.posts.save_with_inlines(post, false, changes).await?;
    tracing::info!(post_id = %post.id, user = %staff.0.username, "Post changed");

    let message = format!("The post \"{}\" was changed successfully.", post.title);
    let view = change_form_view(&state, &post).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(view, message)))
}

/// DELETE /admin/api/posts/{id}
///
/// The post's comments go with it.
pub async fn delete(
    state: web::Data<AppState>,
    staff: StaffIdentity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    state.posts.delete(id).await?;
    tracing::info!(post_id = %id, user = %staff.0.username, "Post deleted");
    Ok(HttpResponse::NoContent().finish())
}

/// POST /admin/api/posts/actions
pub async fn run_action(
    state: web::Data<AppState>,
    staff: StaffIdentity,
    body: web::Json<ActionRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let admin = &state.admin.posts;
    let action = requested_action(admin, &req)?;

    let affected = match action {
        ActionKind::DeleteSelected => state.posts.delete_many(&req.selected).await?,
        ActionKind::ApproveComments => {
            return Err(AppError::BadRequest("Posts cannot be approved.".to_string()));
        }
    };

    Ok(action_done(admin, &staff, action, affected))
}

async fn change_form_view(state: &AppState, post: &Post) -> AppResult<ChangeFormView> {
    let admin = &state.admin.posts;
    let comments = state.comments.find_by_post(post.id).await?;

    let mut form = admin.change_form(post);
    if let (Some(inline), Some(slot)) = (admin.inlines.first(), form.inlines.first_mut()) {
        *slot = render_inline::<CommentField, Comment>(inline, &comments, |c| c.id);
    }

    let view_on_site = match post.absolute_url(state.urls.as_ref()) {
        Ok(url) => Some(url),
        Err(e) => {
            tracing::debug!(post_id = %post.id, "No public URL: {}", e);
            None
        }
    };

    Ok(ChangeFormView {
        model: admin.model_name,
        id: Some(post.id),
        display: Some(post.to_string()),
        view_on_site,
        form,
    })
}

/// Copy submitted values onto `post`, returning every field error found.
///
/// A blank slug is derived from the title; a missing status keeps the
/// current one.
fn apply_form(admin: &ModelAdmin<PostField>, post: &mut Post, form: &PostForm) -> Vec<FieldError> {
    let mut errors = Vec::new();

    post.title = form.title.clone();
    post.content = form.content.clone();
    post.excerpt = form.excerpt.clone().unwrap_or_default();
    post.featured_image = form
        .featured_image
        .clone()
        .filter(|path| !path.trim().is_empty());
    post.author_id = form.author;

    if let Some(status) = &form.status {
        collect(&mut errors, status.parse::<PostStatus>().map(|s| post.status = s));
    }

    let slug = match form.slug.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(slug) => slug.to_string(),
        None => admin
            .prepopulated_value(
                PostField::Slug,
                |field| match field {
                    PostField::Title => post.title.clone(),
                    _ => String::new(),
                },
                |source| slugify(source, SLUG_MAX_LEN),
            )
            .unwrap_or_default(),
    };
    post.slug = slug;

    collect(&mut errors, post.validate());
    errors
}

/// Turn submitted inline rows into changes against the post's comments.
///
/// Rows that add or change a comment without naming an author are reported
/// in `errors` and dropped.
fn inline_changes(
    post_id: Uuid,
    rows: &[InlineCommentForm],
    existing: &[Comment],
    errors: &mut Vec<FieldError>,
) -> Vec<InlineChange> {
    let mut changes = Vec::with_capacity(rows.len());

    for row in rows {
        match (row.id, row.delete) {
            (None, true) => continue,
            (Some(id), true) => {
                changes.push(InlineChange::Delete(id));
                continue;
            }
            _ => {}
        }

        let Some(author_id) = row.author else {
            errors.push(FieldError::new("comments", "Comment author is required."));
            continue;
        };

        let change = match row.id {
            None => {
                let mut comment = Comment::new(post_id, author_id, row.content.clone());
                comment.is_approved = row.is_approved;
                InlineChange::Add(comment)
            }
            Some(id) => {
                let created_date = existing
                    .iter()
                    .find(|c| c.id == id)
                    .map_or_else(Utc::now, |c| c.created_date);
                InlineChange::Change(Comment {
                    id,
                    post_id,
                    author_id,
                    content: row.content.clone(),
                    created_date,
                    is_approved: row.is_approved,
                })
            }
        };
        changes.push(change);
    }

    changes
}

fn collect<T>(errors: &mut Vec<FieldError>, result: Result<T, DomainError>) {
    match result {
        Ok(_) => {}
        Err(DomainError::InvalidFields(found)) => errors.extend(found),
        Err(other) => errors.push(FieldError::new("__all__", other.to_string())),
    }
}
