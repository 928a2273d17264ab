pub(crate) mod ddb_user_repository;
pub(crate) mod memory_user_repository;

use async_trait::async_trait;
use crate::core::exchange::ExchangeResult;
use crate::core::repository::Repository;
use crate::users::domain::model::UserEntity;

#[async_trait]
pub(crate) trait UserRepository: Repository<UserEntity> {
    async fn find_by_email(&self, email: &str) -> ExchangeResult<Vec<UserEntity>>;
}
