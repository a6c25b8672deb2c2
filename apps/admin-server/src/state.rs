//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::admin::AdminSite;
use blog_core::ports::{CommentRepository, PostRepository, UserRepository};
use blog_infra::{DatabaseConnections, SqlCommentRepository, SqlPostRepository, SqlUserRepository};

use crate::urls::RouteTable;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnections,
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub admin: Arc<AdminSite>,
    pub urls: Arc<RouteTable>,
}

impl AppState {
    pub fn new(db: DatabaseConnections, site_url: &str) -> Self {
        let conn = db.main.clone();

        tracing::info!("Application state initialized");

        Self {
            users: Arc::new(SqlUserRepository::new(conn.clone())),
            posts: Arc::new(SqlPostRepository::new(conn.clone())),
            comments: Arc::new(SqlCommentRepository::new(conn)),
            admin: Arc::new(AdminSite::new()),
            urls: Arc::new(RouteTable::new(site_url)),
            db,
        }
    }
}
