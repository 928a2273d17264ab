use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use lazy_static::lazy_static;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::core::exchange::{ExchangeError, ExchangeResult};
use crate::gateway::images::{ImageFile, ImageStore, StoredImage};

lazy_static! {
    static ref SHARED: MemoryImageStore = MemoryImageStore::new();
}

// MemoryImageStore keeps uploads in a process-local map; it backs dev mode and
// the test suite, where orphan checks need to see inside the store.
#[derive(Debug, Clone, Default)]
pub(crate) struct MemoryImageStore {
    images: Arc<RwLock<HashMap<String, ImageFile>>>,
}

impl MemoryImageStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn shared() -> Self {
        SHARED.clone()
    }

    #[cfg(test)]
    pub(crate) async fn contains(&self, image_id: &str) -> bool {
        self.images.read().await.contains_key(image_id)
    }

    #[cfg(test)]
    pub(crate) async fn count(&self) -> usize {
        self.images.read().await.len()
    }
}

#[async_trait]
impl ImageStore for MemoryImageStore {
    async fn upload(&self, file: &ImageFile) -> ExchangeResult<StoredImage> {
        let image_id = Uuid::new_v4().to_string();
        let url = format!("memory://book-images/{}/{}", image_id, file.file_name);
        self.images.write().await.insert(image_id.to_string(), file.clone());
        Ok(StoredImage { url, image_id })
    }

    async fn destroy(&self, image_id: &str) -> ExchangeResult<()> {
        match self.images.write().await.remove(image_id) {
            Some(_) => Ok(()),
            None => Err(ExchangeError::not_found(format!("image not found for {}", image_id).as_str())),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::gateway::images::{ImageFile, ImageStore};
    use crate::gateway::memory::store::MemoryImageStore;

    fn image() -> ImageFile {
        ImageFile {
            file_name: "dune.jpg".to_string(),
            content_type: "image/jpeg".to_string(),
            data: vec![1, 2, 3],
        }
    }

    #[tokio::test]
    async fn test_should_upload_and_destroy_image() {
        let store = MemoryImageStore::new();
        let stored = store.upload(&image()).await.expect("should upload image");
        assert!(stored.url.contains(stored.image_id.as_str()));
        assert!(store.contains(stored.image_id.as_str()).await);
        assert_eq!(1, store.count().await);

        let _ = store.destroy(stored.image_id.as_str()).await.expect("should destroy image");
        assert!(!store.contains(stored.image_id.as_str()).await);
        assert_eq!(0, store.count().await);
    }

    #[tokio::test]
    async fn test_should_fail_destroy_of_missing_image() {
        let store = MemoryImageStore::new();
        let res = store.destroy("missing").await;
        assert!(res.is_err());
    }
}
