pub mod service;

use async_trait::async_trait;
use crate::core::exchange::{ExchangeResult, UserRole};
use crate::users::dto::UserDto;

// Registration carries the signup form; the password is an opaque secret that
// is stored and later compared verbatim.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Registration {
    pub name: String,
    pub mobile: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

#[async_trait]
pub(crate) trait AuthService: Sync + Send {
    async fn register(&self, registration: &Registration) -> ExchangeResult<UserDto>;
    async fn login(&self, email: &str, password: &str) -> ExchangeResult<UserDto>;
}
