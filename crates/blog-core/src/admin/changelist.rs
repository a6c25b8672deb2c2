//! Change list pages and the rows shown on them.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Value, json};
use uuid::Uuid;

use super::fields::{CommentField, PostField};
use crate::domain::{Comment, PostStatus};

/// One page of a change list.
#[derive(Debug, Clone, Serialize)]
pub struct ChangeList<R> {
    pub rows: Vec<R>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub num_pages: u64,
}

impl<R> ChangeList<R> {
    pub fn new(rows: Vec<R>, total: u64, page: u64, per_page: u64) -> Self {
        let num_pages = if per_page == 0 {
            0
        } else {
            total.div_ceil(per_page)
        };
        Self {
            rows,
            total,
            page,
            per_page,
            num_pages,
        }
    }
}

/// A change list row that can render the cell for any list column.
pub trait ListRow<F> {
    fn pk(&self) -> Uuid;

    fn cell(&self, field: F) -> Value;
}

/// A post as listed, with its author resolved to a username.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostRow {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub author_id: Uuid,
    pub author: String,
    pub status: PostStatus,
    pub created_date: DateTime<Utc>,
    pub updated_date: DateTime<Utc>,
}

impl ListRow<PostField> for PostRow {
    fn pk(&self) -> Uuid {
        self.id
    }

    fn cell(&self, field: PostField) -> Value {
        match field {
            PostField::Title => json!(self.title),
            PostField::Slug => json!(self.slug),
            PostField::Author => json!(self.author),
            PostField::Status => json!(self.status.label()),
            PostField::CreatedDate => json!(self.created_date),
            PostField::UpdatedDate => json!(self.updated_date),
            PostField::Content | PostField::Excerpt | PostField::FeaturedImage => Value::Null,
        }
    }
}

impl fmt::Display for PostRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

/// A comment as listed, with author and post resolved to display names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentRow {
    pub id: Uuid,
    pub post_id: Uuid,
    pub post: String,
    pub author_id: Uuid,
    pub author: String,
    pub created_date: DateTime<Utc>,
    pub is_approved: bool,
}

impl ListRow<CommentField> for CommentRow {
    fn pk(&self) -> Uuid {
        self.id
    }

    fn cell(&self, field: CommentField) -> Value {
        match field {
            CommentField::Author | CommentField::AuthorUsername => json!(self.author),
            CommentField::Post | CommentField::PostTitle => json!(self.post),
            CommentField::CreatedDate => json!(self.created_date),
            CommentField::IsApproved => json!(self.is_approved),
            CommentField::Content => Value::Null,
        }
    }
}

impl fmt::Display for CommentRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&Comment::describe(&self.author, &self.post))
    }
}
