//! Changes to a post's comments submitted together with the post.

use uuid::Uuid;

use crate::domain::Comment;
use crate::error::{DomainError, FieldError};

#[derive(Debug, Clone)]
pub enum InlineChange {
    Add(Comment),
    Change(Comment),
    Delete(Uuid),
}

impl InlineChange {
    fn target(&self) -> Option<Uuid> {
        match self {
            InlineChange::Add(_) => None,
            InlineChange::Change(c) => Some(c.id),
            InlineChange::Delete(id) => Some(*id),
        }
    }
}

/// Check a set of inline changes against the post's current comments.
///
/// Changed and deleted rows must be existing comments of `post_id`, added and
/// changed rows must point at `post_id` and pass field validation, and a
/// comment may be touched at most once.
pub fn validate_inlines(
    post_id: Uuid,
    changes: &[InlineChange],
    existing: &[Comment],
) -> Result<(), DomainError> {
    let mut errors = Vec::new();
    let mut seen = Vec::new();

    for change in changes {
        if let Some(id) = change.target() {
            if !existing.iter().any(|c| c.id == id && c.post_id == post_id) {
                errors.push(FieldError::new(
                    "comments",
                    format!("Comment {id} does not belong to this post."),
                ));
            }
            if seen.contains(&id) {
                errors.push(FieldError::new(
                    "comments",
                    format!("Comment {id} appears more than once."),
                ));
            }
            seen.push(id);
        }

        if let InlineChange::Add(comment) | InlineChange::Change(comment) = change {
            if comment.post_id != post_id {
                errors.push(FieldError::new(
                    "comments",
                    "Inline comments must belong to the post being edited.",
                ));
            }
            if let Err(DomainError::InvalidFields(field_errors)) = comment.validate() {
                errors.extend(field_errors);
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(DomainError::InvalidFields(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_changes_to_own_comments() {
        let post_id = Uuid::new_v4();
        let mine = Comment::new(post_id, Uuid::new_v4(), "first".into());
        let mut edited = mine.clone();
        edited.is_approved = true;

        let changes = vec![
            InlineChange::Change(edited),
            InlineChange::Add(Comment::new(post_id, Uuid::new_v4(), "second".into())),
        ];
        assert!(validate_inlines(post_id, &changes, &[mine]).is_ok());
    }

    #[test]
    fn rejects_comments_of_another_post() {
        let post_id = Uuid::new_v4();
        let foreign = Comment::new(Uuid::new_v4(), Uuid::new_v4(), "elsewhere".into());

        let changes = vec![InlineChange::Delete(foreign.id)];
        assert!(validate_inlines(post_id, &changes, &[foreign]).is_err());
    }

    #[test]
    fn rejects_blank_new_comment() {
        let post_id = Uuid::new_v4();
        let changes = vec![InlineChange::Add(Comment::new(post_id, Uuid::new_v4(), "".into()))];
        let Err(DomainError::InvalidFields(errors)) = validate_inlines(post_id, &changes, &[])
        else {
            panic!("expected field errors");
        };
        assert_eq!(errors[0].field, "content");
    }

    #[test]
    fn rejects_duplicate_rows() {
        let post_id = Uuid::new_v4();
        let mine = Comment::new(post_id, Uuid::new_v4(), "first".into());
        let changes = vec![
            InlineChange::Change(mine.clone()),
            InlineChange::Delete(mine.id),
        ];
        assert!(validate_inlines(post_id, &changes, &[mine]).is_err());
    }
}
