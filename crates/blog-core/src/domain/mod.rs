//! Domain entities - the core business objects.

mod comment;
mod post;
pub mod slug;
mod user;

pub use comment::Comment;
pub use post::{
    EXCERPT_MAX_LEN, FEATURED_IMAGE_MAX_LEN, FEATURED_IMAGE_UPLOAD_TO, POST_DETAIL_ROUTE, Post,
    PostStatus, STATUS_MAX_LEN, TITLE_MAX_LEN,
};
pub use slug::{SLUG_MAX_LEN, slugify};
pub use user::{USERNAME_MAX_LEN, User};
