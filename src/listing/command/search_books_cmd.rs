use std::sync::Arc;
use async_trait::async_trait;
use serde::Deserialize;
use crate::books::dto::BookDto;
use crate::core::command::{Command, CommandError};
use crate::listing::domain::{ListingService, SearchFilters};

pub(crate) struct SearchBooksCommand {
    listing_service: Arc<dyn ListingService>,
}

impl SearchBooksCommand {
    pub(crate) fn new(listing_service: Arc<dyn ListingService>) -> Self {
        Self {
            listing_service,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchBooksCommandRequest {
    pub(crate) title: Option<String>,
    pub(crate) location: Option<String>,
}

impl SearchBooksCommandRequest {
    // blank query params impose no constraint, same as absent ones
    pub fn build_filters(&self) -> SearchFilters {
        SearchFilters {
            title: self.title.clone().filter(|title| !title.is_empty()),
            location: self.location.clone().filter(|location| !location.is_empty()),
        }
    }
}

pub(crate) type SearchBooksCommandResponse = Vec<BookDto>;

#[async_trait]
impl Command<SearchBooksCommandRequest, SearchBooksCommandResponse> for SearchBooksCommand {
    async fn execute(&self, req: SearchBooksCommandRequest) -> Result<SearchBooksCommandResponse, CommandError> {
        self.listing_service.search(&req.build_filters()).await.map_err(CommandError::from)
    }
}
