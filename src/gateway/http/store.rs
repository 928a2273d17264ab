use async_trait::async_trait;
use serde::Deserialize;
use crate::core::exchange::{ExchangeError, ExchangeResult};
use crate::gateway::images::{ImageFile, ImageStore, StoredImage};

// HttpImageStore talks to the remote object store over its REST surface: a
// multipart upload yields a durable url plus a deletion handle, and destroy
// posts the handle back.
#[derive(Debug, Clone)]
pub(crate) struct HttpImageStore {
    client: reqwest::Client,
    base_url: String,
    folder: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

impl HttpImageStore {
    pub(crate) fn new(base_url: &str, folder: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            folder: folder.to_string(),
        }
    }
}

#[async_trait]
impl ImageStore for HttpImageStore {
    async fn upload(&self, file: &ImageFile) -> ExchangeResult<StoredImage> {
        let part = reqwest::multipart::Part::bytes(file.data.clone())
            .file_name(file.file_name.to_string())
            .mime_str(file.content_type.as_str())
            .map_err(|err| ExchangeError::validation(
                format!("unsupported content type {} {}", file.content_type, err).as_str(), None))?;
        let form = reqwest::multipart::Form::new()
            .text("folder", self.folder.to_string())
            .part("file", part);
        let resp = self.client
            .post(format!("{}/upload", self.base_url))
            .multipart(form)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(ExchangeError::runtime(
                format!("image upload failed for {}", file.file_name).as_str(),
                Some(resp.status().to_string())));
        }
        let body: UploadResponse = resp.json().await?;
        Ok(StoredImage { url: body.secure_url, image_id: body.public_id })
    }

    async fn destroy(&self, image_id: &str) -> ExchangeResult<()> {
        let resp = self.client
            .post(format!("{}/destroy", self.base_url))
            .json(&serde_json::json!({ "public_id": image_id }))
            .send()
            .await?;
        if resp.status().is_success() {
            Ok(())
        } else if resp.status() == reqwest::StatusCode::NOT_FOUND {
            Err(ExchangeError::not_found(format!("image not found for {}", image_id).as_str()))
        } else {
            Err(ExchangeError::runtime(
                format!("image delete failed for {}", image_id).as_str(),
                Some(resp.status().to_string())))
        }
    }
}

impl From<reqwest::Error> for ExchangeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() {
            ExchangeError::unavailable(format!("image store unreachable {}", err).as_str(), None, true)
        } else if err.is_decode() {
            ExchangeError::serialization(format!("image store response parsing {}", err).as_str())
        } else {
            ExchangeError::runtime(format!("image store request failed {}", err).as_str(), None)
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::gateway::http::store::HttpImageStore;

    #[tokio::test]
    async fn test_should_trim_trailing_slash_from_base_url() {
        let store = HttpImageStore::new("https://images.local/api/", "book-exchange-app");
        assert_eq!("https://images.local/api", store.base_url.as_str());
        assert_eq!("book-exchange-app", store.folder.as_str());
    }
}
