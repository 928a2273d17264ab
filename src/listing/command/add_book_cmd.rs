use std::sync::Arc;
use async_trait::async_trait;
use crate::books::dto::BookDto;
use crate::core::command::{Command, CommandError};
use crate::gateway::images::ImageFile;
use crate::listing::domain::{ListingFields, ListingService};

pub(crate) struct AddBookCommand {
    listing_service: Arc<dyn ListingService>,
}

impl AddBookCommand {
    pub(crate) fn new(listing_service: Arc<dyn ListingService>) -> Self {
        Self {
            listing_service,
        }
    }
}

// built by the controller from the multipart form, never deserialized directly
#[derive(Debug, Default)]
pub(crate) struct AddBookCommandRequest {
    pub(crate) owner_id: Option<String>,
    pub(crate) fields: ListingFields,
    pub(crate) image: Option<ImageFile>,
}

pub(crate) type AddBookCommandResponse = BookDto;

#[async_trait]
impl Command<AddBookCommandRequest, AddBookCommandResponse> for AddBookCommand {
    async fn execute(&self, req: AddBookCommandRequest) -> Result<AddBookCommandResponse, CommandError> {
        self.listing_service.add_listing(
            req.owner_id.as_deref().unwrap_or(""), &req.fields, req.image.as_ref())
            .await.map_err(CommandError::from)
    }
}
