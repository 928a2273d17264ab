use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use lazy_static::lazy_static;
use tokio::sync::RwLock;

use crate::books::domain::model::BookEntity;
use crate::books::repository::BookRepository;
use crate::core::exchange::{ExchangeError, ExchangeResult, PaginatedResult};
use crate::core::repository::Repository;

lazy_static! {
    static ref SHARED: MemoryBookRepository = MemoryBookRepository::new();
}

// MemoryBookRepository keeps listings in a process-local table; it backs dev
// mode and the test suite.
#[derive(Debug, Clone, Default)]
pub(crate) struct MemoryBookRepository {
    rows: Arc<RwLock<HashMap<String, BookEntity>>>,
}

impl MemoryBookRepository {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn shared() -> Self {
        SHARED.clone()
    }

    #[cfg(test)]
    pub(crate) async fn count(&self) -> usize {
        self.rows.read().await.len()
    }
}

fn matches_predicate(book: &BookEntity, predicate: &HashMap<String, String>) -> bool {
    predicate.iter().all(|(k, v)| match k.as_str() {
        "book_id" => book.book_id == *v,
        "owner_id" => book.owner_id == *v,
        "status" => book.status.to_string() == *v,
        "title" => book.title == *v,
        "location" => book.location == *v,
        _ => false,
    })
}

fn contains_ignore_case(value: &str, filter: Option<&str>) -> bool {
    match filter {
        Some(filter) => value.to_lowercase().contains(filter.to_lowercase().as_str()),
        None => true,
    }
}

#[async_trait]
impl Repository<BookEntity> for MemoryBookRepository {
    async fn create(&self, entity: &BookEntity) -> ExchangeResult<usize> {
        let mut rows = self.rows.write().await;
        if rows.contains_key(entity.book_id.as_str()) {
            return Err(ExchangeError::duplicate_key(format!("book already exists for {}", entity.book_id).as_str()));
        }
        rows.insert(entity.book_id.to_string(), entity.clone());
        Ok(1)
    }

    async fn update(&self, entity: &BookEntity) -> ExchangeResult<usize> {
        let mut rows = self.rows.write().await;
        if !rows.contains_key(entity.book_id.as_str()) {
            return Err(ExchangeError::not_found(format!("book not found for {}", entity.book_id).as_str()));
        }
        // last write wins; there is no version guard on book updates
        rows.insert(entity.book_id.to_string(), entity.clone());
        Ok(1)
    }

    async fn get(&self, id: &str) -> ExchangeResult<BookEntity> {
        let rows = self.rows.read().await;
        rows.get(id).cloned()
            .ok_or_else(|| ExchangeError::not_found(format!("book not found for {}", id).as_str()))
    }

    async fn delete(&self, id: &str) -> ExchangeResult<usize> {
        let mut rows = self.rows.write().await;
        match rows.remove(id) {
            Some(_) => Ok(1),
            None => Err(ExchangeError::not_found(format!("book not found for {}", id).as_str())),
        }
    }

    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> ExchangeResult<PaginatedResult<BookEntity>> {
        let rows = self.rows.read().await;
        let records = rows.values()
            .filter(|book| matches_predicate(book, predicate))
            .take(page_size)
            .cloned()
            .collect();
        Ok(PaginatedResult::new(page, page_size, None, records))
    }
}

#[async_trait]
impl BookRepository for MemoryBookRepository {
    async fn find_by_owner_id(&self, owner_id: &str) -> ExchangeResult<Vec<BookEntity>> {
        let rows = self.rows.read().await;
        Ok(rows.values()
            .filter(|book| book.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn search(&self, title: Option<&str>, location: Option<&str>) -> ExchangeResult<Vec<BookEntity>> {
        let rows = self.rows.read().await;
        Ok(rows.values()
            .filter(|book| contains_ignore_case(book.title.as_str(), title)
                && contains_ignore_case(book.location.as_str(), location))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use crate::books::domain::model::BookEntity;
    use crate::books::repository::BookRepository;
    use crate::books::repository::memory_book_repository::MemoryBookRepository;
    use crate::core::exchange::ExchangeError;
    use crate::core::repository::Repository;

    async fn add_test_books(books_repo: &MemoryBookRepository) {
        for (title, location, owner_id) in [
            ("Dune", "Seattle", "u1"),
            ("Dune Messiah", "Portland", "u1"),
            ("The Dispossessed", "Portland", "u2"),
        ] {
            let book = BookEntity::new(title, "author", location, "555-0100", owner_id);
            let size = books_repo.create(&book).await.expect("should create book");
            assert_eq!(1, size);
        }
    }

    #[tokio::test]
    async fn test_should_create_get_delete_books() {
        let books_repo = MemoryBookRepository::new();
        let book = BookEntity::new("Dune", "Frank Herbert", "Seattle", "555-0100", "u1");
        let size = books_repo.create(&book).await.expect("should create book");
        assert_eq!(1, size);

        let loaded = books_repo.get(book.book_id.as_str()).await.expect("should return book");
        assert_eq!(book.book_id, loaded.book_id);

        let deleted = books_repo.delete(book.book_id.as_str()).await.expect("should delete book");
        assert_eq!(1, deleted);
        assert!(books_repo.get(book.book_id.as_str()).await.is_err());
    }

    #[tokio::test]
    async fn test_should_reject_update_of_missing_book() {
        let books_repo = MemoryBookRepository::new();
        let book = BookEntity::new("Dune", "Frank Herbert", "Seattle", "555-0100", "u1");
        let res = books_repo.update(&book).await;
        assert!(matches!(res, Err(ExchangeError::NotFound { message: _ })));
    }

    #[tokio::test]
    async fn test_should_search_case_insensitive() {
        let books_repo = MemoryBookRepository::new();
        add_test_books(&books_repo).await;

        let res = books_repo.search(Some("dune"), None).await.expect("should search books");
        assert_eq!(2, res.len());
        let res = books_repo.search(Some("DUNE"), Some("port")).await.expect("should search books");
        assert_eq!(1, res.len());
        let res = books_repo.search(None, Some("PORTLAND")).await.expect("should search books");
        assert_eq!(2, res.len());
        let res = books_repo.search(None, None).await.expect("should search books");
        assert_eq!(3, res.len());
        let res = books_repo.search(Some("dune"), Some("nowhere")).await.expect("should search books");
        assert_eq!(0, res.len());
    }

    #[tokio::test]
    async fn test_should_find_by_owner() {
        let books_repo = MemoryBookRepository::new();
        add_test_books(&books_repo).await;

        let res = books_repo.find_by_owner_id("u1").await.expect("should return books");
        assert_eq!(2, res.len());
        let res = books_repo.find_by_owner_id("u3").await.expect("should return books");
        assert_eq!(0, res.len());
    }
}
