use std::sync::Arc;
use async_trait::async_trait;
use serde::Deserialize;
use crate::auth::domain::AuthService;
use crate::core::command::{Command, CommandError};
use crate::users::dto::UserDto;

pub(crate) struct LoginUserCommand {
    auth_service: Arc<dyn AuthService>,
}

impl LoginUserCommand {
    pub(crate) fn new(auth_service: Arc<dyn AuthService>) -> Self {
        Self {
            auth_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginUserCommandRequest {
    #[serde(default)]
    pub(crate) email: String,
    #[serde(default)]
    pub(crate) password: String,
}

pub(crate) type LoginUserCommandResponse = UserDto;

#[async_trait]
impl Command<LoginUserCommandRequest, LoginUserCommandResponse> for LoginUserCommand {
    async fn execute(&self, req: LoginUserCommandRequest) -> Result<LoginUserCommandResponse, CommandError> {
        self.auth_service.login(req.email.as_str(), req.password.as_str())
            .await.map_err(CommandError::from)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use async_once::AsyncOnce;
    use lazy_static::lazy_static;
    use uuid::Uuid;
    use crate::auth::command::login_user_cmd::{LoginUserCommand, LoginUserCommandRequest};
    use crate::auth::command::register_user_cmd::{RegisterUserCommand, RegisterUserCommandRequest};
    use crate::auth::domain::AuthService;
    use crate::auth::factory;
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;

    lazy_static! {
        static ref SUT_SVC: AsyncOnce<Arc<dyn AuthService>> = AsyncOnce::new(async {
                factory::create_auth_service(&Configuration::new("test"), RepositoryStore::InMemory).await
            });
    }

    #[tokio::test]
    async fn test_should_run_login_user() {
        let svc = SUT_SVC.get().await.clone();
        let email = format!("{}@org.cc", Uuid::new_v4());
        let register_req = RegisterUserCommandRequest {
            name: "alice".to_string(),
            mobile: "206-555-0100".to_string(),
            email: email.to_string(),
            password: "secret".to_string(),
            role: "Owner".to_string(),
        };
        let _ = RegisterUserCommand::new(svc.clone()).execute(register_req).await.expect("should register user");

        let cmd = LoginUserCommand::new(svc);
        let profile = cmd.execute(LoginUserCommandRequest { email: email.to_string(), password: "secret".to_string() })
            .await.expect("should login user");
        assert_eq!(email, profile.email);

        let res = cmd.execute(LoginUserCommandRequest { email, password: "wrong".to_string() }).await;
        assert!(matches!(res, Err(CommandError::Authentication { message: _, reason_code: _ })));
    }
}
