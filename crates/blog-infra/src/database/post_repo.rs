use async_trait::async_trait;
use sea_orm::entity::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, FromQueryResult, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, TransactionTrait,
};
use uuid::Uuid;

use blog_core::admin::{
    AdminField, ChangeList, ChangeListQuery, DateHierarchy, InlineChange, PostField, PostRow,
    post_admin,
};
use blog_core::domain::Post;
use blog_core::error::RepoError;
use blog_core::ports::PostRepository;

use super::admin_query::post_condition;
use super::base::{SqlRepository, map_db_err};
use super::entity::{comment, post, user};

pub type SqlPostRepository = SqlRepository<post::Entity>;

/// A change list row as selected, with the author's username joined in.
#[derive(Debug, FromQueryResult)]
struct PostRowModel {
    id: Uuid,
    title: String,
    slug: String,
    author_id: Uuid,
    author_username: String,
    status: post::Status,
    created_date: DateTimeWithTimeZone,
    updated_date: DateTimeWithTimeZone,
}

impl From<PostRowModel> for PostRow {
    fn from(row: PostRowModel) -> Self {
        Self {
            id: row.id,
            title: row.title,
            slug: row.slug,
            author_id: row.author_id,
            author: row.author_username,
            status: row.status.into(),
            created_date: row.created_date.into(),
            updated_date: row.updated_date.into(),
        }
    }
}

#[async_trait]
impl PostRepository for SqlPostRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        let model = post::Entity::find()
            .filter(post::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(model.map(Into::into))
    }

    async fn changelist(
        &self,
        query: &ChangeListQuery<PostField>,
    ) -> Result<ChangeList<PostRow>, RepoError> {
        let condition = post_condition(query, &post_admin().search_fields);

        let paginator = post::Entity::find()
            .select_only()
            .columns([
                post::Column::Id,
                post::Column::Title,
                post::Column::Slug,
                post::Column::AuthorId,
                post::Column::Status,
                post::Column::CreatedDate,
                post::Column::UpdatedDate,
            ])
            .column_as(user::Column::Username, "author_username")
            .join(JoinType::InnerJoin, post::Relation::Author.def())
            .filter(condition)
            .order_by_desc(post::Column::CreatedDate)
            .order_by_asc(post::Column::Id)
            .into_model::<PostRowModel>()
            .paginate(&self.db, query.per_page);

        let total = paginator.num_items().await.map_err(map_db_err)?;
        let rows = paginator
            .fetch_page(query.page_index())
            .await
            .map_err(map_db_err)?;
        tracing::debug!(total, page = query.page, "Loaded post change list");

        Ok(ChangeList::new(
            rows.into_iter().map(Into::into).collect(),
            total,
            query.page,
            query.per_page,
        ))
    }

    async fn date_hierarchy(
        &self,
        query: &ChangeListQuery<PostField>,
    ) -> Result<DateHierarchy, RepoError> {
        let condition = post_condition(query, &post_admin().search_fields);

        let dates: Vec<DateTimeWithTimeZone> = post::Entity::find()
            .select_only()
            .column(post::Column::CreatedDate)
            .filter(condition)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(DateHierarchy::build(
            PostField::CreatedDate.name(),
            query.drilldown,
            dates.into_iter().map(Into::into),
        ))
    }

    async fn delete_many(&self, ids: &[Uuid]) -> Result<u64, RepoError> {
        if ids.is_empty() {
            return Ok(0);
        }

        let result = post::Entity::delete_many()
            .filter(post::Column::Id.is_in(ids.iter().copied()))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;
        tracing::info!(deleted = result.rows_affected, "Deleted posts");

        Ok(result.rows_affected)
    }

    async fn save_with_inlines(
        &self,
        post: Post,
        is_new: bool,
        inlines: Vec<InlineChange>,
    ) -> Result<Post, RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let mut active: post::ActiveModel = post.into();
        let model = if is_new {
            active.insert(&txn).await
        } else {
            active.not_set(post::Column::CreatedDate);
            active.update(&txn).await
        }
        .map_err(map_db_err)?;

        for change in inlines {
            match change {
                InlineChange::Add(comment) => {
                    comment::ActiveModel::from(comment)
                        .insert(&txn)
                        .await
                        .map_err(map_db_err)?;
                }
                InlineChange::Change(comment) => {
                    let mut active: comment::ActiveModel = comment.into();
                    active.not_set(comment::Column::CreatedDate);
                    active.update(&txn).await.map_err(map_db_err)?;
                }
                InlineChange::Delete(id) => {
                    let result = comment::Entity::delete_many()
                        .filter(comment::Column::Id.eq(id))
                        .filter(comment::Column::PostId.eq(model.id))
                        .exec(&txn)
                        .await
                        .map_err(map_db_err)?;
                    if result.rows_affected == 0 {
                        return Err(RepoError::NotFound);
                    }
                }
            }
        }

        txn.commit().await.map_err(map_db_err)?;
        tracing::debug!(post_id = %model.id, is_new, "Saved post with inline comments");

        Ok(model.into())
    }
}
