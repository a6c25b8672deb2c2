//! SeaORM persistence for users, posts and comments.

mod admin_query;
mod base;
mod comment_repo;
mod connections;
pub mod entity;
mod post_repo;
mod user_repo;

pub use base::{DomainEntity, SqlRepository};
pub use comment_repo::SqlCommentRepository;
pub use connections::{DatabaseConfig, DatabaseConnections};
pub use post_repo::SqlPostRepository;
pub use user_repo::SqlUserRepository;

#[cfg(test)]
mod tests;
