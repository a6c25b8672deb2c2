use async_trait::async_trait;
use sea_orm::entity::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, EntityTrait, FromQueryResult, JoinType, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait,
};
use uuid::Uuid;

use blog_core::admin::{ChangeList, ChangeListQuery, CommentField, CommentRow, comment_admin};
use blog_core::domain::Comment;
use blog_core::error::RepoError;
use blog_core::ports::CommentRepository;

use super::admin_query::comment_condition;
use super::base::{SqlRepository, map_db_err};
use super::entity::{comment, post, user};

pub type SqlCommentRepository = SqlRepository<comment::Entity>;

#[derive(Debug, FromQueryResult)]
struct CommentRowModel {
    id: Uuid,
    post_id: Uuid,
    post_title: String,
    author_id: Uuid,
    author_username: String,
    created_date: DateTimeWithTimeZone,
    is_approved: bool,
}

impl From<CommentRowModel> for CommentRow {
    fn from(row: CommentRowModel) -> Self {
        Self {
            id: row.id,
            post_id: row.post_id,
            post: row.post_title,
            author_id: row.author_id,
            author: row.author_username,
            created_date: row.created_date.into(),
            is_approved: row.is_approved,
        }
    }
}

#[async_trait]
impl CommentRepository for SqlCommentRepository {
    async fn find_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let models = comment::Entity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .order_by_asc(comment::Column::CreatedDate)
            .order_by_asc(comment::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn changelist(
        &self,
        query: &ChangeListQuery<CommentField>,
    ) -> Result<ChangeList<CommentRow>, RepoError> {
        let condition = comment_condition(query, &comment_admin().search_fields);

        let paginator = comment::Entity::find()
            .select_only()
            .columns([
                comment::Column::Id,
                comment::Column::PostId,
                comment::Column::AuthorId,
                comment::Column::CreatedDate,
                comment::Column::IsApproved,
            ])
            .column_as(post::Column::Title, "post_title")
            .column_as(user::Column::Username, "author_username")
            .join(JoinType::InnerJoin, comment::Relation::Post.def())
            .join(JoinType::InnerJoin, comment::Relation::Author.def())
            .filter(condition)
            .order_by_desc(comment::Column::CreatedDate)
            .order_by_asc(comment::Column::Id)
            .into_model::<CommentRowModel>()
            .paginate(&self.db, query.per_page);

        let total = paginator.num_items().await.map_err(map_db_err)?;
        let rows = paginator
            .fetch_page(query.page_index())
            .await
            .map_err(map_db_err)?;
        tracing::debug!(total, page = query.page, "Loaded comment change list");

        Ok(ChangeList::new(
            rows.into_iter().map(Into::into).collect(),
            total,
            query.page,
            query.per_page,
        ))
    }

    async fn delete_many(&self, ids: &[Uuid]) -> Result<u64, RepoError> {
        if ids.is_empty() {
            return Ok(0);
        }

        let result = comment::Entity::delete_many()
            .filter(comment::Column::Id.is_in(ids.iter().copied()))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;
        tracing::info!(deleted = result.rows_affected, "Deleted comments");

        Ok(result.rows_affected)
    }

    async fn approve(&self, ids: &[Uuid]) -> Result<u64, RepoError> {
        if ids.is_empty() {
            return Ok(0);
        }

        let result = comment::Entity::update_many()
            .col_expr(comment::Column::IsApproved, Expr::value(true))
            .filter(comment::Column::Id.is_in(ids.iter().copied()))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;
        tracing::info!(approved = result.rows_affected, "Approved comments");

        Ok(result.rows_affected)
    }
}
