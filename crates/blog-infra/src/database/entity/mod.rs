//! SeaORM entities mirroring the migrated schema.

pub mod comment;
pub mod post;
pub mod user;
