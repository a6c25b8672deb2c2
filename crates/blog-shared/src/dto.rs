//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// A user's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub is_staff: bool,
    pub created_at: DateTime<Utc>,
}

/// Submitted post change form, including its inline comments.
///
/// Optional fields fall back to their model defaults: a blank slug is
/// prepopulated from the title, status defaults to draft.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostForm {
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    pub content: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub featured_image: Option<String>,
    pub author: Uuid,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub comments: Vec<InlineCommentForm>,
}

/// One row of the comment inline on the post form.
///
/// Rows without `id` are additions; rows with `delete` set remove the comment.
/// `author` is only needed on rows that add or change a comment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InlineCommentForm {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub author: Option<Uuid>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub is_approved: bool,
    #[serde(default)]
    pub delete: bool,
}

/// Submitted comment change form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentForm {
    pub post: Uuid,
    pub author: Uuid,
    pub content: String,
    #[serde(default)]
    pub is_approved: bool,
}

/// Bulk action over selected change list rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionRequest {
    pub action: String,
    #[serde(default)]
    pub selected: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionResponse {
    pub action: String,
    pub affected: u64,
}

/// A post as shown on the public site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicPostResponse {
    pub title: String,
    pub slug: String,
    pub url: String,
    pub content: String,
    pub excerpt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
    pub author: String,
    pub created_date: DateTime<Utc>,
    pub updated_date: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_form_defaults_optional_fields() {
        let author = Uuid::new_v4();
        let form: PostForm = serde_json::from_value(serde_json::json!({
            "title": "Hello",
            "content": "Body",
            "author": author,
        }))
        .unwrap();

        assert_eq!(form.author, author);
        assert!(form.slug.is_none());
        assert!(form.status.is_none());
        assert!(form.comments.is_empty());
    }

    #[test]
    fn inline_rows_default_to_additions() {
        let row: InlineCommentForm = serde_json::from_value(serde_json::json!({
            "author": Uuid::new_v4(),
            "content": "Nice",
        }))
        .unwrap();

        assert!(row.id.is_none());
        assert!(!row.delete);
        assert!(!row.is_approved);
    }

    #[test]
    fn delete_rows_need_only_an_id() {
        let id = Uuid::new_v4();
        let row: InlineCommentForm =
            serde_json::from_value(serde_json::json!({ "id": id, "delete": true })).unwrap();

        assert_eq!(row.id, Some(id));
        assert!(row.delete);
        assert!(row.author.is_none());
    }
}
