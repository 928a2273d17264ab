pub mod service;

use async_trait::async_trait;
use crate::books::dto::BookDto;
use crate::core::exchange::{BookStatus, ExchangeResult};
use crate::gateway::images::ImageFile;

// SearchFilters narrows the public catalog; absent fields impose no constraint
// and present fields match case-insensitive substrings, combined with AND.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct SearchFilters {
    pub title: Option<String>,
    pub location: Option<String>,
}

// ListingFields carries the caller-editable attributes of a listing. On update,
// empty or absent fields leave the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ListingFields {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub location: Option<String>,
    pub contact: Option<String>,
}

#[async_trait]
pub(crate) trait ListingService: Sync + Send {
    async fn search(&self, filters: &SearchFilters) -> ExchangeResult<Vec<BookDto>>;
    async fn find_by_owner(&self, owner_id: &str) -> ExchangeResult<Vec<BookDto>>;
    async fn add_listing(&self, owner_id: &str, fields: &ListingFields,
                         image: Option<&ImageFile>) -> ExchangeResult<BookDto>;
    async fn update_listing(&self, book_id: &str, owner_id: &str, fields: &ListingFields,
                            image: Option<&ImageFile>) -> ExchangeResult<BookDto>;
    async fn update_status(&self, book_id: &str, owner_id: &str, status: BookStatus) -> ExchangeResult<BookDto>;
    async fn remove_listing(&self, book_id: &str, owner_id: &str) -> ExchangeResult<()>;
}
