use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use lazy_static::lazy_static;
use tokio::sync::RwLock;

use crate::core::exchange::{ExchangeError, ExchangeResult, PaginatedResult};
use crate::core::repository::Repository;
use crate::users::domain::model::UserEntity;
use crate::users::repository::UserRepository;

lazy_static! {
    static ref SHARED: MemoryUserRepository = MemoryUserRepository::new();
}

// MemoryUserRepository keeps accounts in a process-local table; it backs dev
// mode and the test suite, where no DynamoDB endpoint is reachable.
#[derive(Debug, Clone, Default)]
pub(crate) struct MemoryUserRepository {
    rows: Arc<RwLock<HashMap<String, UserEntity>>>,
}

impl MemoryUserRepository {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    // the process-wide table, shared by every service built from the factory
    pub(crate) fn shared() -> Self {
        SHARED.clone()
    }
}

fn matches_predicate(user: &UserEntity, predicate: &HashMap<String, String>) -> bool {
    predicate.iter().all(|(k, v)| match k.as_str() {
        "user_id" => user.user_id == *v,
        "email" => user.email == *v,
        "role" => user.role.to_string() == *v,
        "name" => user.name == *v,
        _ => false,
    })
}

#[async_trait]
impl Repository<UserEntity> for MemoryUserRepository {
    async fn create(&self, entity: &UserEntity) -> ExchangeResult<usize> {
        let mut rows = self.rows.write().await;
        if rows.contains_key(entity.user_id.as_str()) {
            return Err(ExchangeError::duplicate_key(format!("user already exists for {}", entity.user_id).as_str()));
        }
        rows.insert(entity.user_id.to_string(), entity.clone());
        Ok(1)
    }

    async fn update(&self, entity: &UserEntity) -> ExchangeResult<usize> {
        let mut rows = self.rows.write().await;
        if !rows.contains_key(entity.user_id.as_str()) {
            return Err(ExchangeError::not_found(format!("user not found for {}", entity.user_id).as_str()));
        }
        rows.insert(entity.user_id.to_string(), entity.clone());
        Ok(1)
    }

    async fn get(&self, id: &str) -> ExchangeResult<UserEntity> {
        let rows = self.rows.read().await;
        rows.get(id).cloned()
            .ok_or_else(|| ExchangeError::not_found(format!("user not found for {}", id).as_str()))
    }

    async fn delete(&self, id: &str) -> ExchangeResult<usize> {
        let mut rows = self.rows.write().await;
        match rows.remove(id) {
            Some(_) => Ok(1),
            None => Err(ExchangeError::not_found(format!("user not found for {}", id).as_str())),
        }
    }

    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> ExchangeResult<PaginatedResult<UserEntity>> {
        let rows = self.rows.read().await;
        let records = rows.values()
            .filter(|user| matches_predicate(user, predicate))
            .take(page_size)
            .cloned()
            .collect();
        Ok(PaginatedResult::new(page, page_size, None, records))
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> ExchangeResult<Vec<UserEntity>> {
        let predicate = HashMap::from([
            ("email".to_string(), email.to_string()),
        ]);
        let res = self.query(&predicate, None, 50).await?;
        Ok(res.records)
    }
}

#[cfg(test)]
mod tests {
    use crate::core::exchange::{ExchangeError, UserRole};
    use crate::core::repository::Repository;
    use crate::users::domain::model::UserEntity;
    use crate::users::repository::memory_user_repository::MemoryUserRepository;
    use crate::users::repository::UserRepository;

    #[tokio::test]
    async fn test_should_create_get_users() {
        let users_repo = MemoryUserRepository::new();
        let user = UserEntity::new("alice", "206-555-0100", "alice@org.cc", "secret", UserRole::Owner);
        let size = users_repo.create(&user).await.expect("should create user");
        assert_eq!(1, size);

        let loaded = users_repo.get(user.user_id.as_str()).await.expect("should return user");
        assert_eq!(user.user_id, loaded.user_id);
    }

    #[tokio::test]
    async fn test_should_reject_duplicate_user_id() {
        let users_repo = MemoryUserRepository::new();
        let user = UserEntity::new("alice", "206-555-0100", "alice@org.cc", "secret", UserRole::Owner);
        let _ = users_repo.create(&user).await.expect("should create user");
        let res = users_repo.create(&user).await;
        assert!(matches!(res, Err(ExchangeError::DuplicateKey { message: _ })));
    }

    #[tokio::test]
    async fn test_should_find_by_email() {
        let users_repo = MemoryUserRepository::new();
        let user = UserEntity::new("alice", "206-555-0100", "alice@org.cc", "secret", UserRole::Owner);
        let other = UserEntity::new("bob", "206-555-0101", "bob@org.cc", "secret", UserRole::Seeker);
        let _ = users_repo.create(&user).await.expect("should create user");
        let _ = users_repo.create(&other).await.expect("should create user");

        let res = users_repo.find_by_email("alice@org.cc").await.expect("should return users");
        assert_eq!(1, res.len());
        let res = users_repo.find_by_email("carol@org.cc").await.expect("should return users");
        assert_eq!(0, res.len());
    }

    #[tokio::test]
    async fn test_should_delete_users() {
        let users_repo = MemoryUserRepository::new();
        let user = UserEntity::new("alice", "206-555-0100", "alice@org.cc", "secret", UserRole::Owner);
        let _ = users_repo.create(&user).await.expect("should create user");

        let deleted = users_repo.delete(user.user_id.as_str()).await.expect("should delete user");
        assert_eq!(1, deleted);

        let loaded = users_repo.get(user.user_id.as_str()).await;
        assert!(loaded.is_err());
    }

    #[tokio::test]
    async fn test_should_share_rows_between_clones() {
        let users_repo = MemoryUserRepository::new();
        let user = UserEntity::new("alice", "206-555-0100", "alice@org.cc", "secret", UserRole::Owner);
        let _ = users_repo.create(&user).await.expect("should create user");

        let view = users_repo.clone();
        let loaded = view.get(user.user_id.as_str()).await.expect("should return user");
        assert_eq!(user.email, loaded.email);
    }
}
