pub mod factory;
pub mod http;
pub mod images;
pub mod memory;

// ImageStoreVia selects the object-store backing for uploaded book images.
#[derive(Debug, PartialEq, Clone, Copy)]
pub(crate) enum ImageStoreVia {
    Remote,
    InMemory,
}

#[cfg(test)]
mod tests {
    use crate::gateway::ImageStoreVia;

    #[tokio::test]
    async fn test_should_create_image_store_via() {
        let _ = ImageStoreVia::Remote;
        let _ = ImageStoreVia::InMemory;
    }
}
