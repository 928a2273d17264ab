use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::exchange::ExchangeResult;

// ImageFile is an uploaded file exactly as the transport layer received it.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ImageFile {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

// StoredImage pairs the durable url with the opaque handle required to delete
// the upload later; the two share one lifecycle on a book record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct StoredImage {
    pub url: String,
    pub image_id: String,
}

#[async_trait]
pub(crate) trait ImageStore: Sync + Send {
    async fn upload(&self, file: &ImageFile) -> ExchangeResult<StoredImage>;
    async fn destroy(&self, image_id: &str) -> ExchangeResult<()>;
}
