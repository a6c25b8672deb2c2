use async_trait::async_trait;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

use blog_core::domain::User;
use blog_core::error::RepoError;
use blog_core::ports::UserRepository;

use super::base::{SqlRepository, map_db_err};
use super::entity::user;

pub type SqlUserRepository = SqlRepository<user::Entity>;

#[async_trait]
impl UserRepository for SqlUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let model = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(model.map(Into::into))
    }
}
