//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod repository;
mod urls;

pub use auth::{AuthError, PasswordService, STAFF_ROLE, TokenClaims, TokenService};
pub use repository::{BaseRepository, CommentRepository, PostRepository, UserRepository};
pub use urls::UrlResolver;
