use std::sync::Arc;
use async_trait::async_trait;
use serde::Serialize;
use crate::core::command::{Command, CommandError};
use crate::listing::domain::ListingService;

pub(crate) struct RemoveBookCommand {
    listing_service: Arc<dyn ListingService>,
}

impl RemoveBookCommand {
    pub(crate) fn new(listing_service: Arc<dyn ListingService>) -> Self {
        Self {
            listing_service,
        }
    }
}

#[derive(Debug)]
pub(crate) struct RemoveBookCommandRequest {
    pub(crate) book_id: String,
    pub(crate) owner_id: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct RemoveBookCommandResponse {
    pub message: String,
}

#[async_trait]
impl Command<RemoveBookCommandRequest, RemoveBookCommandResponse> for RemoveBookCommand {
    async fn execute(&self, req: RemoveBookCommandRequest) -> Result<RemoveBookCommandResponse, CommandError> {
        self.listing_service.remove_listing(req.book_id.as_str(), req.owner_id.as_str())
            .await.map_err(CommandError::from)
            .map(|_| RemoveBookCommandResponse { message: "Book removed successfully".to_string() })
    }
}

#[cfg(test)]
mod tests {
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;
    use crate::listing::command::remove_book_cmd::{RemoveBookCommand, RemoveBookCommandRequest};
    use crate::listing::factory;

    #[tokio::test]
    async fn test_should_reject_remove_of_missing_book() {
        let svc = factory::create_listing_service(&Configuration::new("test"), RepositoryStore::InMemory).await;
        let cmd = RemoveBookCommand::new(svc);
        let req = RemoveBookCommandRequest { book_id: "missing".to_string(), owner_id: "u1".to_string() };
        let res = cmd.execute(req).await;
        assert!(matches!(res, Err(CommandError::NotFound { message: _ })));
    }
}
