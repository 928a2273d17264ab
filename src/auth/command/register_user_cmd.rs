use std::sync::Arc;
use async_trait::async_trait;
use serde::Deserialize;
use crate::auth::domain::{AuthService, Registration};
use crate::core::command::{Command, CommandError};
use crate::core::exchange::UserRole;
use crate::users::dto::UserDto;

pub(crate) struct RegisterUserCommand {
    auth_service: Arc<dyn AuthService>,
}

impl RegisterUserCommand {
    pub(crate) fn new(auth_service: Arc<dyn AuthService>) -> Self {
        Self {
            auth_service,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RegisterUserCommandRequest {
    #[serde(default)]
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) mobile: String,
    #[serde(default)]
    pub(crate) email: String,
    #[serde(default)]
    pub(crate) password: String,
    #[serde(default)]
    pub(crate) role: String,
}

impl RegisterUserCommandRequest {
    pub fn build_registration(&self) -> Registration {
        Registration {
            name: self.name.to_string(),
            mobile: self.mobile.to_string(),
            email: self.email.to_string(),
            password: self.password.to_string(),
            role: UserRole::from(self.role.to_string()),
        }
    }
}

pub(crate) type RegisterUserCommandResponse = UserDto;

#[async_trait]
impl Command<RegisterUserCommandRequest, RegisterUserCommandResponse> for RegisterUserCommand {
    async fn execute(&self, req: RegisterUserCommandRequest) -> Result<RegisterUserCommandResponse, CommandError> {
        self.auth_service.register(&req.build_registration()).await.map_err(CommandError::from)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use async_once::AsyncOnce;
    use lazy_static::lazy_static;
    use uuid::Uuid;
    use crate::auth::domain::AuthService;
    use crate::auth::factory;
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;
    use crate::core::exchange::UserRole;
    use crate::core::repository::RepositoryStore;
    use crate::auth::command::register_user_cmd::{RegisterUserCommand, RegisterUserCommandRequest};

    lazy_static! {
        static ref SUT_SVC: AsyncOnce<Arc<dyn AuthService>> = AsyncOnce::new(async {
                factory::create_auth_service(&Configuration::new("test"), RepositoryStore::InMemory).await
            });
    }

    fn request(email: &str) -> RegisterUserCommandRequest {
        RegisterUserCommandRequest {
            name: "alice".to_string(),
            mobile: "206-555-0100".to_string(),
            email: email.to_string(),
            password: "secret".to_string(),
            role: "Owner".to_string(),
        }
    }

    #[tokio::test]
    async fn test_should_run_register_user() {
        let cmd = RegisterUserCommand::new(SUT_SVC.get().await.clone());
        let email = format!("{}@org.cc", Uuid::new_v4());

        let profile = cmd.execute(request(email.as_str())).await.expect("should register user");
        assert_eq!(email, profile.email);
        assert_eq!(UserRole::Owner, profile.role);

        let res = cmd.execute(request(email.as_str())).await;
        assert!(matches!(res, Err(CommandError::DuplicateKey { message: _ })));
    }

    #[tokio::test]
    async fn test_should_default_unknown_role_to_seeker() {
        let mut req = request("any@org.cc");
        req.role = "Admin".to_string();
        assert_eq!(UserRole::Seeker, req.build_registration().role);
    }
}
