//! Translate admin change list queries into SeaORM conditions.

use sea_orm::sea_query::{Expr, Func, LikeExpr, SimpleExpr};
use sea_orm::{ColumnTrait, Condition};

use blog_core::admin::{ChangeListQuery, CommentField, DateRange, FilterValue, PostField};
use sea_orm::entity::prelude::DateTimeWithTimeZone;

use super::entity::{comment, post, user};

/// `%term%` with LIKE wildcards in the term escaped by `\`.
fn contains_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// Case-insensitive substring match of `term` in `column`.
fn icontains(column: SimpleExpr, term: &str) -> SimpleExpr {
    Expr::expr(Func::lower(column)).like(LikeExpr::new(contains_pattern(term)).escape('\\'))
}

/// Every term must match at least one of `columns`.
fn search_condition(terms: &[String], columns: &[SimpleExpr]) -> Condition {
    terms.iter().fold(Condition::all(), |all, term| {
        let any = columns
            .iter()
            .fold(Condition::any(), |any, col| any.add(icontains(col.clone(), term)));
        all.add(any)
    })
}

fn within(column: impl ColumnTrait, range: &DateRange) -> Condition {
    let start: DateTimeWithTimeZone = range.start.into();
    let end: DateTimeWithTimeZone = range.end.into();
    Condition::all()
        .add(column.gte(start))
        .add(column.lt(end))
}

fn post_search_column(field: PostField) -> Option<SimpleExpr> {
    let column = match field {
        PostField::Title => post::Column::Title,
        PostField::Slug => post::Column::Slug,
        PostField::Content => post::Column::Content,
        PostField::Excerpt => post::Column::Excerpt,
        _ => return None,
    };
    Some(Expr::col((post::Entity, column)).into())
}

/// Search, filters and drill-down of a post change list.
pub(crate) fn post_condition(
    query: &ChangeListQuery<PostField>,
    search_fields: &[PostField],
) -> Condition {
    let columns: Vec<SimpleExpr> = search_fields
        .iter()
        .filter_map(|f| post_search_column(*f))
        .collect();
    let mut condition = search_condition(&query.search_terms, &columns);

    for filter in &query.filters {
        condition = match (filter.field, &filter.value) {
            (PostField::Status, FilterValue::Choice(status)) => {
                condition.add(post::Column::Status.eq(status.as_str()))
            }
            (PostField::Author, FilterValue::Id(author_id)) => {
                condition.add(post::Column::AuthorId.eq(*author_id))
            }
            (PostField::CreatedDate, FilterValue::Date(range)) => {
                condition.add(within(post::Column::CreatedDate, range))
            }
            (PostField::UpdatedDate, FilterValue::Date(range)) => {
                condition.add(within(post::Column::UpdatedDate, range))
            }
            (field, value) => {
                tracing::warn!(?field, ?value, "Ignoring unsupported post filter");
                condition
            }
        };
    }

    if let Some(range) = query.drilldown_range() {
        condition = condition.add(within(post::Column::CreatedDate, &range));
    }

    condition
}

fn comment_search_column(field: CommentField) -> Option<SimpleExpr> {
    let expr = match field {
        CommentField::Content => Expr::col((comment::Entity, comment::Column::Content)),
        CommentField::AuthorUsername => Expr::col((user::Entity, user::Column::Username)),
        CommentField::PostTitle => Expr::col((post::Entity, post::Column::Title)),
        _ => return None,
    };
    Some(expr.into())
}

/// Search and filters of a comment change list.
///
/// Search terms may reference the author and post tables, so the select must
/// join both.
pub(crate) fn comment_condition(
    query: &ChangeListQuery<CommentField>,
    search_fields: &[CommentField],
) -> Condition {
    let columns: Vec<SimpleExpr> = search_fields
        .iter()
        .filter_map(|f| comment_search_column(*f))
        .collect();
    let mut condition = search_condition(&query.search_terms, &columns);

    for filter in &query.filters {
        condition = match (filter.field, &filter.value) {
            (CommentField::IsApproved, FilterValue::Bool(approved)) => {
                condition.add(comment::Column::IsApproved.eq(*approved))
            }
            (CommentField::CreatedDate, FilterValue::Date(range)) => {
                condition.add(within(comment::Column::CreatedDate, range))
            }
            (CommentField::Post, FilterValue::Id(post_id)) => {
                condition.add(comment::Column::PostId.eq(*post_id))
            }
            (CommentField::Author, FilterValue::Id(author_id)) => {
                condition.add(comment::Column::AuthorId.eq(*author_id))
            }
            (field, value) => {
                tracing::warn!(?field, ?value, "Ignoring unsupported comment filter");
                condition
            }
        };
    }

    if let Some(range) = query.drilldown_range() {
        condition = condition.add(within(comment::Column::CreatedDate, &range));
    }

    condition
}
