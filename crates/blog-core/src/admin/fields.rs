//! Admin-visible fields of posts and comments.

use serde_json::{Value, json};

use super::form::FormRecord;
use super::options::{AdminField, FieldKind};
use crate::domain::{
    Comment, EXCERPT_MAX_LEN, FEATURED_IMAGE_MAX_LEN, FEATURED_IMAGE_UPLOAD_TO, Post, PostStatus,
    SLUG_MAX_LEN, TITLE_MAX_LEN, USERNAME_MAX_LEN,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PostField {
    Title,
    Slug,
    Content,
    Excerpt,
    FeaturedImage,
    Author,
    Status,
    CreatedDate,
    UpdatedDate,
}

impl AdminField for PostField {
    fn all() -> &'static [Self] {
        use PostField::*;
        &[
            Title,
            Slug,
            Content,
            Excerpt,
            FeaturedImage,
            Author,
            Status,
            CreatedDate,
            UpdatedDate,
        ]
    }

    fn name(&self) -> &'static str {
        match self {
            PostField::Title => "title",
            PostField::Slug => "slug",
            PostField::Content => "content",
            PostField::Excerpt => "excerpt",
            PostField::FeaturedImage => "featured_image",
            PostField::Author => "author",
            PostField::Status => "status",
            PostField::CreatedDate => "created_date",
            PostField::UpdatedDate => "updated_date",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            PostField::Title => "Title",
            PostField::Slug => "Slug",
            PostField::Content => "Content",
            PostField::Excerpt => "Excerpt",
            PostField::FeaturedImage => "Featured image",
            PostField::Author => "Author",
            PostField::Status => "Status",
            PostField::CreatedDate => "Created date",
            PostField::UpdatedDate => "Updated date",
        }
    }

    fn kind(&self) -> FieldKind {
        match self {
            PostField::Title => FieldKind::Char {
                max_length: TITLE_MAX_LEN,
            },
            PostField::Slug => FieldKind::Slug {
                max_length: SLUG_MAX_LEN,
            },
            PostField::Content => FieldKind::Text { max_length: None },
            PostField::Excerpt => FieldKind::Text {
                max_length: Some(EXCERPT_MAX_LEN),
            },
            PostField::FeaturedImage => FieldKind::Image {
                max_length: FEATURED_IMAGE_MAX_LEN,
                upload_to: FEATURED_IMAGE_UPLOAD_TO,
            },
            PostField::Author => FieldKind::ForeignKey { to: "user" },
            PostField::Status => FieldKind::Choice {
                choices: PostStatus::CHOICES,
            },
            PostField::CreatedDate | PostField::UpdatedDate => FieldKind::DateTime,
        }
    }

    fn required(&self) -> bool {
        !matches!(self, PostField::Excerpt | PostField::FeaturedImage)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentField {
    Post,
    Author,
    Content,
    CreatedDate,
    IsApproved,
    /// `username` of the comment's author.
    AuthorUsername,
    /// `title` of the commented post.
    PostTitle,
}

impl AdminField for CommentField {
    fn all() -> &'static [Self] {
        use CommentField::*;
        &[
            Post,
            Author,
            Content,
            CreatedDate,
            IsApproved,
            AuthorUsername,
            PostTitle,
        ]
    }

    fn name(&self) -> &'static str {
        match self {
            CommentField::Post => "post",
            CommentField::Author => "author",
            CommentField::Content => "content",
            CommentField::CreatedDate => "created_date",
            CommentField::IsApproved => "is_approved",
            CommentField::AuthorUsername => "author.username",
            CommentField::PostTitle => "post.title",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            CommentField::Post => "Post",
            CommentField::Author => "Author",
            CommentField::Content => "Content",
            CommentField::CreatedDate => "Created date",
            CommentField::IsApproved => "Is approved",
            CommentField::AuthorUsername => "Author username",
            CommentField::PostTitle => "Post title",
        }
    }

    fn kind(&self) -> FieldKind {
        match self {
            CommentField::Post => FieldKind::ForeignKey { to: "post" },
            CommentField::Author => FieldKind::ForeignKey { to: "user" },
            CommentField::Content => FieldKind::Text { max_length: None },
            CommentField::CreatedDate => FieldKind::DateTime,
            CommentField::IsApproved => FieldKind::Boolean,
            CommentField::AuthorUsername => FieldKind::Char {
                max_length: USERNAME_MAX_LEN,
            },
            CommentField::PostTitle => FieldKind::Char {
                max_length: TITLE_MAX_LEN,
            },
        }
    }

    fn required(&self) -> bool {
        matches!(
            self,
            CommentField::Post | CommentField::Author | CommentField::Content
        )
    }
}

impl FormRecord<PostField> for Post {
    fn value(&self, field: PostField) -> Value {
        match field {
            PostField::Title => json!(self.title),
            PostField::Slug => json!(self.slug),
            PostField::Content => json!(self.content),
            PostField::Excerpt => json!(self.excerpt),
            PostField::FeaturedImage => json!(self.featured_image),
            PostField::Author => json!(self.author_id),
            PostField::Status => json!(self.status),
            PostField::CreatedDate => json!(self.created_date),
            PostField::UpdatedDate => json!(self.updated_date),
        }
    }
}

impl FormRecord<CommentField> for Comment {
    fn value(&self, field: CommentField) -> Value {
        match field {
            CommentField::Post => json!(self.post_id),
            CommentField::Author => json!(self.author_id),
            CommentField::Content => json!(self.content),
            CommentField::CreatedDate => json!(self.created_date),
            CommentField::IsApproved => json!(self.is_approved),
            CommentField::AuthorUsername | CommentField::PostTitle => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_round_trip() {
        for field in PostField::all() {
            assert_eq!(PostField::from_name(field.name()), Some(*field));
        }
        for field in CommentField::all() {
            assert_eq!(CommentField::from_name(field.name()), Some(*field));
        }
        assert_eq!(PostField::from_name("category"), None);
    }

    #[test]
    fn optional_post_fields() {
        assert!(!PostField::Excerpt.required());
        assert!(!PostField::FeaturedImage.required());
        assert!(PostField::Slug.required());
    }
}
