use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DomainError, FieldError};

/// Comment entity - a reader's reply to a post, subject to moderation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub created_date: DateTime<Utc>,
    pub is_approved: bool,
}

impl Comment {
    /// Create a new, unapproved comment.
    pub fn new(post_id: Uuid, author_id: Uuid, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            post_id,
            author_id,
            content,
            created_date: Utc::now(),
            is_approved: false,
        }
    }

    /// Display string of a comment, given its author's username and its post's title.
    pub fn describe(author: &str, post_title: &str) -> String {
        format!("Comment by {author} on {post_title}")
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.content.trim().is_empty() {
            return Err(DomainError::InvalidFields(vec![FieldError::new(
                "content",
                "This field is required.",
            )]));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_comment_awaits_moderation() {
        let comment = Comment::new(Uuid::new_v4(), Uuid::new_v4(), "Nice!".into());
        assert!(!comment.is_approved);
        assert!(comment.validate().is_ok());
    }

    #[test]
    fn blank_content_is_rejected() {
        let comment = Comment::new(Uuid::new_v4(), Uuid::new_v4(), " \n".into());
        assert!(comment.validate().is_err());
    }
}
