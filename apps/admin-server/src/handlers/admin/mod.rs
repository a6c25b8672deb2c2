//! Admin console endpoints. Every route requires a staff identity.

mod comments;
mod posts;
mod views;

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use blog_core::admin::{ActionKind, AdminField, ModelAdmin};
use blog_core::error::FieldError;
use blog_shared::ApiResponse;
use blog_shared::dto::{ActionRequest, ActionResponse};

use crate::middleware::auth::StaffIdentity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

const NO_SELECTION: &str =
    "Items must be selected in order to perform actions on them. No items have been changed.";

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .service(
            web::scope("/posts")
                .route("", web::get().to(posts::changelist))
                .route("", web::post().to(posts::create))
                .route("/add", web::get().to(posts::add_form))
                .route("/actions", web::post().to(posts::run_action))
                .route("/{id}", web::get().to(posts::detail))
                .route("/{id}", web::put().to(posts::update))
                .route("/{id}", web::delete().to(posts::delete)),
        )
        .service(
            web::scope("/comments")
                .route("", web::get().to(comments::changelist))
                .route("", web::post().to(comments::create))
                .route("/add", web::get().to(comments::add_form))
                .route("/actions", web::post().to(comments::run_action))
                .route("/{id}", web::get().to(comments::detail))
                .route("/{id}", web::put().to(comments::update))
                .route("/{id}", web::delete().to(comments::delete)),
        );
}

/// GET /admin/api/
async fn index(state: web::Data<AppState>, _staff: StaffIdentity) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::ok(state.admin.index()))
}

/// Resolve the requested bulk action against the model's declared actions.
fn requested_action<F: AdminField>(
    admin: &ModelAdmin<F>,
    req: &ActionRequest,
) -> AppResult<ActionKind> {
    let action = admin.find_action(&req.action).ok_or_else(|| {
        tracing::warn!(action = %req.action, model = admin.model_name, "Undeclared admin action");
        AppError::BadRequest(format!(
            "No action {:?} on {}.",
            req.action, admin.verbose_name_plural
        ))
    })?;
    if req.selected.is_empty() {
        return Err(AppError::BadRequest(NO_SELECTION.to_string()));
    }
    Ok(action)
}

fn action_done<F: AdminField>(
    admin: &ModelAdmin<F>,
    staff: &StaffIdentity,
    action: ActionKind,
    affected: u64,
) -> HttpResponse {
    let verb = match action {
        ActionKind::DeleteSelected => "deleted",
        ActionKind::ApproveComments => "approved",
    };
    tracing::info!(
        action = action.name(),
        model = admin.model_name,
        affected,
        user = %staff.0.username,
        "Admin action applied"
    );

    HttpResponse::Ok().json(ApiResponse::ok_with_message(
        ActionResponse {
            action: action.name().to_string(),
            affected,
        },
        format!(
            "Successfully {verb} {affected} {}.",
            admin.verbose_name_plural
        ),
    ))
}

fn not_found(entity: &str, id: Uuid) -> AppError {
    AppError::NotFound(format!("{entity} with id {id} not found"))
}

fn into_result(errors: Vec<FieldError>) -> AppResult<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}

#[cfg(test)]
mod tests {
    use blog_core::admin::{comment_admin, post_admin};

    use super::*;

    fn request(action: &str, selected: Vec<Uuid>) -> ActionRequest {
        ActionRequest {
            action: action.to_string(),
            selected,
        }
    }

    #[test]
    fn approve_is_only_offered_on_comments() {
        let ids = vec![Uuid::new_v4()];
        assert!(requested_action(&post_admin(), &request("approve_comments", ids.clone())).is_err());
        assert_eq!(
            requested_action(&comment_admin(), &request("approve_comments", ids)).unwrap(),
            ActionKind::ApproveComments
        );
    }

    #[test]
    fn empty_selection_is_rejected() {
        let err = requested_action(&post_admin(), &request("delete_selected", vec![])).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(msg) if msg == NO_SELECTION));
    }
}
