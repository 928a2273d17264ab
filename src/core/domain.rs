use serde::{Deserialize, Serialize};

// Identifiable defines common traits that can be shared by persistent objects
pub trait Identifiable: Sync + Send {
    fn id(&self) -> String;
}

// Configuration abstracts config options for the exchange backend
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub(crate) struct Configuration {
    pub env: String,
    pub http_port: u16,
    pub image_store_url: String,
    pub image_folder: String,
}

impl Configuration {
    pub fn new(env: &str) -> Self {
        Configuration {
            env: env.to_string(),
            http_port: std::env::var("PORT").ok()
                .and_then(|port| port.parse().ok()).unwrap_or(5001),
            image_store_url: std::env::var("IMAGE_STORE_URL")
                .unwrap_or_else(|_| "https://images.bookswap.local/api".to_string()),
            image_folder: "book-exchange-app".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::domain::Configuration;

    #[tokio::test]
    async fn test_should_build_config() {
        let config = Configuration::new("test");
        assert_eq!("test", config.env.as_str());
        assert_eq!("book-exchange-app", config.image_folder.as_str());
        assert!(!config.image_store_url.is_empty());
    }
}
