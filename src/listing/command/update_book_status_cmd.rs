use std::sync::Arc;
use async_trait::async_trait;
use serde::Deserialize;
use crate::books::dto::BookDto;
use crate::core::command::{Command, CommandError};
use crate::core::exchange::BookStatus;
use crate::listing::domain::ListingService;

pub(crate) struct UpdateBookStatusCommand {
    listing_service: Arc<dyn ListingService>,
}

impl UpdateBookStatusCommand {
    pub(crate) fn new(listing_service: Arc<dyn ListingService>) -> Self {
        Self {
            listing_service,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateBookStatusCommandRequest {
    #[serde(skip)]
    pub(crate) book_id: String,
    pub(crate) status: String,
    #[serde(default)]
    pub(crate) owner_id: Option<String>,
}

pub(crate) type UpdateBookStatusCommandResponse = BookDto;

#[async_trait]
impl Command<UpdateBookStatusCommandRequest, UpdateBookStatusCommandResponse> for UpdateBookStatusCommand {
    async fn execute(&self, req: UpdateBookStatusCommandRequest) -> Result<UpdateBookStatusCommandResponse, CommandError> {
        // the status must parse before any lookup or write happens
        let status = BookStatus::parse(req.status.as_str())
            .ok_or_else(|| CommandError::Validation {
                message: format!("invalid status value {}", req.status),
                reason_code: None,
            })?;
        self.listing_service.update_status(
            req.book_id.as_str(), req.owner_id.as_deref().unwrap_or(""), status)
            .await.map_err(CommandError::from)
    }
}
