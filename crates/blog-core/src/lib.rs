//! # Blog Core
//!
//! The domain layer of the Quill blog.
//! Entities, field constraints, repository ports and the declarative admin
//! configuration live here, with zero infrastructure dependencies.

pub mod admin;
pub mod domain;
pub mod error;
pub mod ports;

pub use error::{DomainError, FieldError, RepoError};
