//! # Quill Admin Server
//!
//! Actix-web server for the blog's admin console and public post pages.

use std::io;
use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

use blog_core::ports::{PasswordService, TokenService};
use blog_infra::{Argon2PasswordService, DatabaseConnections, JwtTokenService};

mod bootstrap;
mod config;
mod handlers;
mod middleware;
mod observability;
mod state;
mod telemetry;
mod urls;

use config::AppConfig;
use observability::RequestIdMiddleware;
use state::AppState;
use telemetry::TelemetryConfig;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env().map_err(|e| {
        tracing::error!("Invalid configuration: {}", e);
        io::Error::other(e)
    })?;

    tracing::info!("Starting Quill admin server on {}:{}", config.host, config.port);

    let db = DatabaseConnections::init(&config.database)
        .await
        .map_err(|e| {
            tracing::error!("Failed to connect to database: {}", e);
            io::Error::other(e)
        })?;

    let token_service: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(config.jwt.clone()));
    let password_service: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());

    let state = AppState::new(db, &config.site_url);

    if let Some(account) = &config.admin {
        bootstrap::ensure_staff_user(state.users.as_ref(), password_service.as_ref(), account)
            .await
            .map_err(|e| io::Error::other(e.to_string()))?;
    }

    let token_data = web::Data::new(token_service);
    let password_data = web::Data::new(password_service);

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(RequestIdMiddleware)
            .app_data(web::Data::new(state.clone()))
            .app_data(token_data.clone())
            .app_data(password_data.clone())
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
