//! The registered admin models.

use serde::Serialize;

use super::fields::{CommentField, PostField};
use super::options::{ActionKind, AdminAction, Fieldset, InlineAdmin, ModelAdmin};

/// Admin for posts.
pub fn post_admin() -> ModelAdmin<PostField> {
    use PostField::*;

    ModelAdmin::new("post", "posts")
        .list_display(&[Title, Author, Status, CreatedDate, UpdatedDate])
        .list_filter(&[Status, CreatedDate, Author])
        .search_fields(&[Title, Content, Excerpt])
        .prepopulate(Slug, &[Title])
        .fieldset(Fieldset::new(
            "Content",
            &[Title, Slug, Content, Excerpt, FeaturedImage],
        ))
        .fieldset(Fieldset::new("Metadata", &[Author, Status]))
        .inline(comment_inline())
        .readonly_fields(&[CreatedDate, UpdatedDate])
        .date_hierarchy(CreatedDate)
}

/// Comments edited on the post form.
fn comment_inline() -> InlineAdmin {
    use CommentField::*;

    InlineAdmin::tabular("comment", "comments", Post, &[Author, Content, CreatedDate, IsApproved])
        .readonly(&[CreatedDate])
        .extra(0)
}

/// Admin for comments.
pub fn comment_admin() -> ModelAdmin<CommentField> {
    use CommentField::*;

    ModelAdmin::new("comment", "comments")
        .list_display(&[Author, Post, CreatedDate, IsApproved])
        .list_filter(&[IsApproved, CreatedDate])
        .search_fields(&[Content, AuthorUsername, PostTitle])
        .readonly_fields(&[CreatedDate])
        .action(ActionKind::ApproveComments)
}

/// Summary of a registered model for the admin index.
#[derive(Debug, Clone, Serialize)]
pub struct RegisteredModel {
    pub name: &'static str,
    pub verbose_name_plural: &'static str,
    pub actions: Vec<AdminAction>,
}

/// Every model managed through the admin console.
#[derive(Debug, Clone)]
pub struct AdminSite {
    pub posts: ModelAdmin<PostField>,
    pub comments: ModelAdmin<CommentField>,
}

impl AdminSite {
    pub fn new() -> Self {
        Self {
            posts: post_admin(),
            comments: comment_admin(),
        }
    }

    pub fn index(&self) -> Vec<RegisteredModel> {
        vec![
            RegisteredModel {
                name: self.posts.model_name,
                verbose_name_plural: self.posts.verbose_name_plural,
                actions: self.posts.action_list(),
            },
            RegisteredModel {
                name: self.comments.model_name,
                verbose_name_plural: self.comments.verbose_name_plural,
                actions: self.comments.action_list(),
            },
        ]
    }
}

impl Default for AdminSite {
    fn default() -> Self {
        Self::new()
    }
}
