use crate::core::repository::RepositoryStore;
use crate::users::repository::UserRepository;
use crate::users::repository::ddb_user_repository::DDBUserRepository;
use crate::users::repository::memory_user_repository::MemoryUserRepository;
use crate::utils::ddb::{build_db_client, create_table};

pub(crate) async fn create_user_repository(store: RepositoryStore) -> Box<dyn UserRepository> {
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(store).await;
            Box::new(DDBUserRepository::new(client, "users", "users_ndx"))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(store).await;
            let _ = create_table(&client, "users", "user_id", "email", "role").await;
            Box::new(DDBUserRepository::new(client, "users", "users_ndx"))
        }
        RepositoryStore::InMemory => {
            Box::new(MemoryUserRepository::shared())
        }
    }
}
