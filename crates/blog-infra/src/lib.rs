//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `blog-core`: SeaORM
//! repositories for users, posts and comments, and the sign-in services.
//!
//! ## Feature Flags
//!
//! - `full` (default) - PostgreSQL and authentication
//! - `postgres` - PostgreSQL driver for SeaORM
//! - `sqlite` - SQLite driver for SeaORM, used by the test suite
//! - `auth` - JWT + Argon2 authentication

pub mod database;

#[cfg(feature = "auth")]
pub mod auth;

pub use database::{
    DatabaseConfig, DatabaseConnections, SqlCommentRepository, SqlPostRepository,
    SqlUserRepository,
};

#[cfg(feature = "auth")]
pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
