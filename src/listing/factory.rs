use std::sync::Arc;
use crate::books::factory::create_book_repository;
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::gateway::factory::create_image_store;
use crate::listing::domain::ListingService;
use crate::listing::domain::service::ListingServiceImpl;
use crate::users::factory::create_user_repository;

pub(crate) async fn create_listing_service(config: &Configuration, store: RepositoryStore) -> Arc<dyn ListingService> {
    let book_repository = create_book_repository(store).await;
    let user_repository = create_user_repository(store).await;
    let image_store = create_image_store(config, store.image_store_via()).await;
    Arc::new(ListingServiceImpl::new(config, book_repository, user_repository, image_store))
}
