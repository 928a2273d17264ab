use std::sync::Arc;
use crate::auth::domain::AuthService;
use crate::auth::domain::service::AuthServiceImpl;
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::users::factory::create_user_repository;

pub(crate) async fn create_auth_service(config: &Configuration, store: RepositoryStore) -> Arc<dyn AuthService> {
    let user_repository = create_user_repository(store).await;
    Arc::new(AuthServiceImpl::new(config, user_repository))
}
