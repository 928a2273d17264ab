use async_trait::async_trait;
use core::option::Option;
use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use crate::core::exchange::{ExchangeResult, PaginatedResult};
use crate::gateway::ImageStoreVia;

#[async_trait]
pub trait Repository<Entity>: Sync + Send {
    // create an entity
    async fn create(&self, entity: &Entity) -> ExchangeResult<usize>;

    // updates an entity
    async fn update(&self, entity: &Entity) -> ExchangeResult<usize>;

    // get an entity
    async fn get(&self, id: &str) -> ExchangeResult<Entity>;

    // delete an entity
    async fn delete(&self, id: &str) -> ExchangeResult<usize>;

    // find by exact-match predicate
    async fn query(&self, predicate: &HashMap::<String, String>,
                   page: Option<&str>, page_size: usize) -> ExchangeResult<PaginatedResult<Entity>>;
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
pub(crate) enum RepositoryStore {
    DynamoDB,
    LocalDynamoDB,
    InMemory,
}

impl RepositoryStore {
    pub fn image_store_via(&self) -> ImageStoreVia {
        match self {
            RepositoryStore::DynamoDB => { ImageStoreVia::Remote },
            RepositoryStore::LocalDynamoDB => { ImageStoreVia::InMemory },
            RepositoryStore::InMemory => { ImageStoreVia::InMemory },
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::repository::RepositoryStore;
    use crate::gateway::ImageStoreVia;

    #[tokio::test]
    async fn test_should_pick_image_store_for_repository_store() {
        assert_eq!(ImageStoreVia::Remote, RepositoryStore::DynamoDB.image_store_via());
        assert_eq!(ImageStoreVia::InMemory, RepositoryStore::LocalDynamoDB.image_store_via());
        assert_eq!(ImageStoreVia::InMemory, RepositoryStore::InMemory.image_store_via());
    }
}
