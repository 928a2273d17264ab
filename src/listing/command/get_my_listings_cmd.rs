use std::sync::Arc;
use async_trait::async_trait;
use serde::Deserialize;
use crate::books::dto::BookDto;
use crate::core::command::{Command, CommandError};
use crate::listing::domain::ListingService;

pub(crate) struct GetMyListingsCommand {
    listing_service: Arc<dyn ListingService>,
}

impl GetMyListingsCommand {
    pub(crate) fn new(listing_service: Arc<dyn ListingService>) -> Self {
        Self {
            listing_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GetMyListingsCommandRequest {
    pub(crate) user_id: String,
}

pub(crate) type GetMyListingsCommandResponse = Vec<BookDto>;

#[async_trait]
impl Command<GetMyListingsCommandRequest, GetMyListingsCommandResponse> for GetMyListingsCommand {
    async fn execute(&self, req: GetMyListingsCommandRequest) -> Result<GetMyListingsCommandResponse, CommandError> {
        self.listing_service.find_by_owner(req.user_id.as_str()).await.map_err(CommandError::from)
    }
}
