//! HTTP handlers and route configuration.

mod admin;
mod auth;
mod blog;
mod health;

use actix_web::web;

use blog_core::domain::POST_DETAIL_ROUTE;

use crate::middleware::error::AppError;
use crate::urls::POST_DETAIL_PATH;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .service(
            web::scope("/api")
                .route("/health", web::get().to(health::health_check))
                .service(
                    web::scope("/auth")
                        .route("/login", web::post().to(auth::login))
                        .route("/me", web::get().to(auth::me)),
                ),
        )
        .service(web::scope("/admin/api").configure(admin::configure))
        .service(
            web::resource(POST_DETAIL_PATH)
                .name(POST_DETAIL_ROUTE)
                .route(web::get().to(blog::post_detail)),
        );
}

/// Malformed bodies become problem documents like every other error.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}

#[cfg(test)]
mod tests;
