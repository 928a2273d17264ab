use std::sync::Arc;
use async_trait::async_trait;
use crate::books::dto::BookDto;
use crate::core::command::{Command, CommandError};
use crate::gateway::images::ImageFile;
use crate::listing::domain::{ListingFields, ListingService};

pub(crate) struct UpdateBookCommand {
    listing_service: Arc<dyn ListingService>,
}

impl UpdateBookCommand {
    pub(crate) fn new(listing_service: Arc<dyn ListingService>) -> Self {
        Self {
            listing_service,
        }
    }
}

// built by the controller from the path and the multipart form
#[derive(Debug, Default)]
pub(crate) struct UpdateBookCommandRequest {
    pub(crate) book_id: String,
    pub(crate) owner_id: Option<String>,
    pub(crate) fields: ListingFields,
    pub(crate) image: Option<ImageFile>,
}

pub(crate) type UpdateBookCommandResponse = BookDto;

#[async_trait]
impl Command<UpdateBookCommandRequest, UpdateBookCommandResponse> for UpdateBookCommand {
    async fn execute(&self, req: UpdateBookCommandRequest) -> Result<UpdateBookCommandResponse, CommandError> {
        self.listing_service.update_listing(
            req.book_id.as_str(), req.owner_id.as_deref().unwrap_or(""),
            &req.fields, req.image.as_ref())
            .await.map_err(CommandError::from)
    }
}

#[cfg(test)]
mod tests {
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;
    use crate::listing::command::update_book_cmd::{UpdateBookCommand, UpdateBookCommandRequest};
    use crate::listing::factory;

    #[tokio::test]
    async fn test_should_reject_update_of_missing_book() {
        let svc = factory::create_listing_service(&Configuration::new("test"), RepositoryStore::InMemory).await;
        let cmd = UpdateBookCommand::new(svc);
        let req = UpdateBookCommandRequest {
            book_id: "missing".to_string(),
            owner_id: Some("u1".to_string()),
            ..UpdateBookCommandRequest::default()
        };
        let res = cmd.execute(req).await;
        assert!(matches!(res, Err(CommandError::NotFound { message: _ })));
    }
}
