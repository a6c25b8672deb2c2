use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::slug::{SLUG_MAX_LEN, is_valid_slug};
use crate::error::{DomainError, FieldError};
use crate::ports::UrlResolver;

pub const TITLE_MAX_LEN: usize = 200;
pub const EXCERPT_MAX_LEN: usize = 300;
pub const FEATURED_IMAGE_MAX_LEN: usize = 100;
pub const STATUS_MAX_LEN: usize = 10;

/// Directory under the media root that featured images are uploaded to.
pub const FEATURED_IMAGE_UPLOAD_TO: &str = "blog_images/";

/// Name of the route that serves a single post.
pub const POST_DETAIL_ROUTE: &str = "post_detail";

/// Publication status of a post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
}

impl PostStatus {
    /// Stored value and human label for every status.
    pub const CHOICES: &'static [(&'static str, &'static str)] =
        &[("draft", "Draft"), ("published", "Published")];

    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PostStatus::Draft => "Draft",
            PostStatus::Published => "Published",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(PostStatus::Draft),
            "published" => Ok(PostStatus::Published),
            other => Err(DomainError::InvalidFields(vec![FieldError::new(
                "status",
                format!("Select a valid choice. {other} is not one of the available choices."),
            )])),
        }
    }
}

/// Post entity - a blog article.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: String,
    /// Path of the uploaded image relative to the media root.
    pub featured_image: Option<String>,
    pub excerpt: String,
    pub author_id: Uuid,
    pub created_date: DateTime<Utc>,
    pub updated_date: DateTime<Utc>,
    pub status: PostStatus,
}

impl Post {
    /// Create a new draft post.
    pub fn new(author_id: Uuid, title: String, slug: String, content: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            slug,
            content,
            featured_image: None,
            excerpt: String::new(),
            author_id,
            created_date: now,
            updated_date: now,
            status: PostStatus::default(),
        }
    }

    pub fn with_status(mut self, status: PostStatus) -> Self {
        self.status = status;
        self
    }

    /// Refresh `updated_date` ahead of a save.
    ///
    /// The new value is always strictly later than the previous one, even if
    /// the clock has not advanced since the last save.
    pub fn touch(&mut self) {
        let now = Utc::now();
        self.updated_date = if now > self.updated_date {
            now
        } else {
            self.updated_date + TimeDelta::microseconds(1)
        };
    }

    /// Public address of this post, resolved through the `post_detail` route.
    pub fn absolute_url(&self, resolver: &dyn UrlResolver) -> Result<String, DomainError> {
        resolver.reverse(POST_DETAIL_ROUTE, &[("slug", self.slug.as_str())])
    }

    /// Check field constraints, reporting every violation.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut errors = Vec::new();

        required_max("title", &self.title, TITLE_MAX_LEN, &mut errors);
        required_max("slug", &self.slug, SLUG_MAX_LEN, &mut errors);
        if !self.slug.is_empty() && !is_valid_slug(&self.slug) {
            errors.push(FieldError::new(
                "slug",
                "Enter a valid slug consisting of letters, numbers, underscores or hyphens.",
            ));
        }
        if self.content.trim().is_empty() {
            errors.push(FieldError::new("content", "This field is required."));
        }
        max_len("excerpt", &self.excerpt, EXCERPT_MAX_LEN, &mut errors);
        if let Some(path) = &self.featured_image {
            max_len("featured_image", path, FEATURED_IMAGE_MAX_LEN, &mut errors);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(DomainError::InvalidFields(errors))
        }
    }
}

impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

pub(crate) fn required_max(
    field: &'static str,
    value: &str,
    max: usize,
    errors: &mut Vec<FieldError>,
) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, "This field is required."));
    } else {
        max_len(field, value, max, errors);
    }
}

pub(crate) fn max_len(field: &'static str, value: &str, max: usize, errors: &mut Vec<FieldError>) {
    let len = value.chars().count();
    if len > max {
        errors.push(FieldError::new(
            field,
            format!("Ensure this value has at most {max} characters (it has {len})."),
        ));
    }
}
