use crate::core::domain::Configuration;
use crate::gateway::ImageStoreVia;
use crate::gateway::http::store::HttpImageStore;
use crate::gateway::images::ImageStore;
use crate::gateway::memory::store::MemoryImageStore;

pub(crate) async fn create_image_store(config: &Configuration, via: ImageStoreVia) -> Box<dyn ImageStore> {
    match via {
        ImageStoreVia::Remote => {
            Box::new(HttpImageStore::new(config.image_store_url.as_str(), config.image_folder.as_str()))
        }
        ImageStoreVia::InMemory => {
            Box::new(MemoryImageStore::shared())
        }
    }
}
