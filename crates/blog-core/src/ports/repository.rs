use async_trait::async_trait;
use uuid::Uuid;

use crate::admin::{
    ChangeList, ChangeListQuery, CommentField, CommentRow, DateHierarchy, InlineChange, PostField,
    PostRow,
};
use crate::domain::{Comment, Post, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity.
    async fn create(&self, entity: T) -> Result<T, RepoError>;

    /// Overwrite an existing entity. Creation timestamps are never written.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID, cascading to dependent records.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError>;

    /// One page of posts matching the query, newest first.
    async fn changelist(
        &self,
        query: &ChangeListQuery<PostField>,
    ) -> Result<ChangeList<PostRow>, RepoError>;

    /// Creation dates of matching posts grouped for drill-down.
    async fn date_hierarchy(
        &self,
        query: &ChangeListQuery<PostField>,
    ) -> Result<DateHierarchy, RepoError>;

    /// Delete every listed post in one statement; returns the number removed.
    async fn delete_many(&self, ids: &[Uuid]) -> Result<u64, RepoError>;

    /// Create or update a post together with its inline comment changes in
    /// one transaction.
    async fn save_with_inlines(
        &self,
        post: Post,
        is_new: bool,
        inlines: Vec<InlineChange>,
    ) -> Result<Post, RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, Uuid> {
    /// Comments of a post, oldest first.
    async fn find_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError>;

    async fn changelist(
        &self,
        query: &ChangeListQuery<CommentField>,
    ) -> Result<ChangeList<CommentRow>, RepoError>;

    async fn delete_many(&self, ids: &[Uuid]) -> Result<u64, RepoError>;

    /// Mark every listed comment approved in a single update statement.
    async fn approve(&self, ids: &[Uuid]) -> Result<u64, RepoError>;
}
