pub(crate) mod ddb_book_repository;
pub(crate) mod memory_book_repository;

use async_trait::async_trait;
use crate::books::domain::model::BookEntity;
use crate::core::exchange::ExchangeResult;
use crate::core::repository::Repository;

#[async_trait]
pub(crate) trait BookRepository: Repository<BookEntity> {
    async fn find_by_owner_id(&self, owner_id: &str) -> ExchangeResult<Vec<BookEntity>>;

    // case-insensitive substring match on title and location; absent filters
    // impose no constraint and both filters combine with AND
    async fn search(&self, title: Option<&str>, location: Option<&str>) -> ExchangeResult<Vec<BookEntity>>;
}
