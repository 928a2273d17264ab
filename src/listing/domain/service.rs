use std::collections::HashMap;
use async_trait::async_trait;
use chrono::Utc;
use tracing::log::warn;
use crate::books::domain::Book;
use crate::books::domain::model::BookEntity;
use crate::books::dto::BookDto;
use crate::books::repository::BookRepository;
use crate::core::domain::Configuration;
use crate::core::exchange::{BookStatus, ExchangeError, ExchangeResult, UserRole};
use crate::gateway::images::{ImageFile, ImageStore, StoredImage};
use crate::listing::domain::{ListingFields, ListingService, SearchFilters};
use crate::users::domain::model::UserEntity;
use crate::users::dto::OwnerDto;
use crate::users::repository::UserRepository;

pub(crate) struct ListingServiceImpl {
    book_repository: Box<dyn BookRepository>,
    user_repository: Box<dyn UserRepository>,
    image_store: Box<dyn ImageStore>,
}

impl ListingServiceImpl {
    pub(crate) fn new(_config: &Configuration, book_repository: Box<dyn BookRepository>,
                      user_repository: Box<dyn UserRepository>,
                      image_store: Box<dyn ImageStore>) -> Self {
        Self {
            book_repository,
            user_repository,
            image_store,
        }
    }

    // The caller must resolve to an existing account holding the Owner role.
    // A missing account maps to access-denied rather than not-found so the
    // response does not reveal which ids exist.
    async fn authorize_owner(&self, owner_id: &str) -> ExchangeResult<UserEntity> {
        if owner_id.is_empty() {
            return Err(ExchangeError::validation("owner id is required", None));
        }
        let owner = match self.user_repository.get(owner_id).await {
            Ok(user) => user,
            Err(ExchangeError::NotFound { .. }) => {
                return Err(ExchangeError::access_denied(
                    format!("user {} not found or not authorized", owner_id).as_str(), None));
            }
            Err(err) => {
                return Err(err);
            }
        };
        if owner.role != UserRole::Owner {
            return Err(ExchangeError::access_denied(
                format!("user {} is not an owner", owner_id).as_str(), None));
        }
        Ok(owner)
    }

    // Loads the book and verifies the caller is its owner by strict string
    // equality against the stored owner id.
    async fn owned_book(&self, book_id: &str, owner_id: &str) -> ExchangeResult<BookEntity> {
        if owner_id.is_empty() {
            return Err(ExchangeError::validation("owner id is required", None));
        }
        let book = self.book_repository.get(book_id).await?;
        if !book.owned_by(owner_id) {
            return Err(ExchangeError::access_denied(
                format!("user {} is not authorized to manage book {}", owner_id, book_id).as_str(), None));
        }
        Ok(book)
    }

    // Best-effort deletion; the remote store is not authoritative, so failures
    // are logged and never escalated to the caller.
    async fn destroy_image(&self, image_id: &str) {
        if let Err(err) = self.image_store.destroy(image_id).await {
            warn!("failed to delete image {}: {}", image_id, err);
        }
    }

    async fn owner_summary(&self, owner_id: &str) -> ExchangeResult<Option<OwnerDto>> {
        match self.user_repository.get(owner_id).await {
            Ok(user) => Ok(Some(OwnerDto::from(&user))),
            // the account may have been removed since the listing was created
            Err(ExchangeError::NotFound { .. }) => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn enrich(&self, book: &BookEntity) -> ExchangeResult<BookDto> {
        let mut dto = BookDto::from(book);
        dto.owner = self.owner_summary(book.owner_id.as_str()).await?;
        Ok(dto)
    }

    async fn enrich_all(&self, books: Vec<BookEntity>) -> ExchangeResult<Vec<BookDto>> {
        let mut owners: HashMap<String, Option<OwnerDto>> = HashMap::new();
        let mut records = Vec::with_capacity(books.len());
        for book in &books {
            if !owners.contains_key(book.owner_id.as_str()) {
                let summary = self.owner_summary(book.owner_id.as_str()).await?;
                owners.insert(book.owner_id.to_string(), summary);
            }
            let mut dto = BookDto::from(book);
            dto.owner = owners.get(book.owner_id.as_str()).cloned().flatten();
            records.push(dto);
        }
        Ok(records)
    }
}

fn required_field<'a>(name: &str, value: &'a Option<String>) -> ExchangeResult<&'a str> {
    match value {
        Some(val) if !val.is_empty() => Ok(val.as_str()),
        _ => Err(ExchangeError::validation(format!("{} is required", name).as_str(), None)),
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|val| !val.is_empty())
}

// Partial update by omission: only non-empty inputs replace stored values.
fn merge_fields(book: &mut BookEntity, fields: &ListingFields) {
    if let Some(title) = non_empty(&fields.title) {
        book.title = title.to_string();
    }
    if let Some(author) = non_empty(&fields.author) {
        book.author = author.to_string();
    }
    if let Some(genre) = non_empty(&fields.genre) {
        book.genre = Some(genre.to_string());
    }
    if let Some(location) = non_empty(&fields.location) {
        book.location = location.to_string();
    }
    if let Some(contact) = non_empty(&fields.contact) {
        book.contact = contact.to_string();
    }
}

#[async_trait]
impl ListingService for ListingServiceImpl {
    async fn search(&self, filters: &SearchFilters) -> ExchangeResult<Vec<BookDto>> {
        let books = self.book_repository.search(
            filters.title.as_deref(), filters.location.as_deref()).await?;
        self.enrich_all(books).await
    }

    async fn find_by_owner(&self, owner_id: &str) -> ExchangeResult<Vec<BookDto>> {
        let books = self.book_repository.find_by_owner_id(owner_id).await?;
        self.enrich_all(books).await
    }

    // validate, authorize, upload, persist; the only compensation left is the
    // uploaded image when the persist step fails
    async fn add_listing(&self, owner_id: &str, fields: &ListingFields,
                         image: Option<&ImageFile>) -> ExchangeResult<BookDto> {
        let owner = self.authorize_owner(owner_id).await?;
        let title = required_field("title", &fields.title)?;
        let author = required_field("author", &fields.author)?;
        let location = required_field("location", &fields.location)?;
        let contact = required_field("contact", &fields.contact)?;

        let uploaded = match image {
            Some(file) => Some(self.image_store.upload(file).await?),
            None => None,
        };
        let mut book = BookEntity::new(title, author, location, contact, owner.user_id.as_str());
        book.genre = non_empty(&fields.genre).map(str::to_string);
        if let Some(stored) = &uploaded {
            book.image_url = Some(stored.url.to_string());
            book.image_id = Some(stored.image_id.to_string());
        }
        if let Err(err) = self.book_repository.create(&book).await {
            // no orphaned upload: undo the image before surfacing the error
            if let Some(stored) = &uploaded {
                self.destroy_image(stored.image_id.as_str()).await;
            }
            return Err(err);
        }
        let mut dto = BookDto::from(&book);
        dto.owner = Some(OwnerDto::from(&owner));
        Ok(dto)
    }

    async fn update_listing(&self, book_id: &str, owner_id: &str, fields: &ListingFields,
                            image: Option<&ImageFile>) -> ExchangeResult<BookDto> {
        let mut book = self.owned_book(book_id, owner_id).await?;
        let mut uploaded: Option<StoredImage> = None;
        if let Some(file) = image {
            let stored = self.image_store.upload(file).await?;
            if let Some(previous) = book.image_id.clone() {
                self.destroy_image(previous.as_str()).await;
            }
            book.image_url = Some(stored.url.to_string());
            book.image_id = Some(stored.image_id.to_string());
            uploaded = Some(stored);
        }
        merge_fields(&mut book, fields);
        book.updated_at = Utc::now().naive_utc();
        if let Err(err) = self.book_repository.update(&book).await {
            if let Some(stored) = &uploaded {
                self.destroy_image(stored.image_id.as_str()).await;
            }
            return Err(err);
        }
        self.enrich(&book).await
    }

    async fn update_status(&self, book_id: &str, owner_id: &str, status: BookStatus) -> ExchangeResult<BookDto> {
        let mut book = self.owned_book(book_id, owner_id).await?;
        book.status = status;
        book.updated_at = Utc::now().naive_utc();
        self.book_repository.update(&book).await?;
        self.enrich(&book).await
    }

    async fn remove_listing(&self, book_id: &str, owner_id: &str) -> ExchangeResult<()> {
        let book = self.owned_book(book_id, owner_id).await?;
        // record deletion is never blocked by storage-provider flakiness
        if let Some(image_id) = &book.image_id {
            self.destroy_image(image_id.as_str()).await;
        }
        self.book_repository.delete(book.book_id.as_str()).await.map(|_| ())
    }
}

impl From<&BookEntity> for BookDto {
    fn from(other: &BookEntity) -> Self {
        Self {
            book_id: other.book_id.to_string(),
            title: other.title.to_string(),
            author: other.author.to_string(),
            genre: other.genre.clone(),
            location: other.location.to_string(),
            contact: other.contact.to_string(),
            image_url: other.image_url.clone(),
            image_id: other.image_id.clone(),
            status: other.status,
            owner_id: other.owner_id.to_string(),
            owner: None,
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}

impl From<&UserEntity> for OwnerDto {
    fn from(other: &UserEntity) -> Self {
        Self {
            user_id: other.user_id.to_string(),
            name: other.name.to_string(),
            email: other.email.to_string(),
        }
    }
}
