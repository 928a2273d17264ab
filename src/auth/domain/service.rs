use async_trait::async_trait;
use crate::auth::domain::{AuthService, Registration};
use crate::core::domain::Configuration;
use crate::core::exchange::{ExchangeError, ExchangeResult};
use crate::users::domain::model::UserEntity;
use crate::users::dto::UserDto;
use crate::users::repository::UserRepository;

pub(crate) struct AuthServiceImpl {
    user_repository: Box<dyn UserRepository>,
}

impl AuthServiceImpl {
    pub(crate) fn new(_config: &Configuration, user_repository: Box<dyn UserRepository>) -> Self {
        Self {
            user_repository,
        }
    }
}

#[async_trait]
impl AuthService for AuthServiceImpl {
    async fn register(&self, registration: &Registration) -> ExchangeResult<UserDto> {
        if registration.email.is_empty() {
            return Err(ExchangeError::validation("email is required", None));
        }
        if registration.password.is_empty() {
            return Err(ExchangeError::validation("password is required", None));
        }
        let existing = self.user_repository.find_by_email(registration.email.as_str()).await?;
        if !existing.is_empty() {
            return Err(ExchangeError::duplicate_key(
                format!("user already exists for {}", registration.email).as_str()));
        }
        let user = UserEntity::new(registration.name.as_str(), registration.mobile.as_str(),
                                   registration.email.as_str(), registration.password.as_str(),
                                   registration.role);
        let _ = self.user_repository.create(&user).await?;
        Ok(UserDto::from(&user))
    }

    async fn login(&self, email: &str, password: &str) -> ExchangeResult<UserDto> {
        let matches = self.user_repository.find_by_email(email).await?;
        match matches.first() {
            // the comparison is verbatim; password hashing is a known,
            // documented limitation of the observable contract
            Some(user) if user.password == password => Ok(UserDto::from(user)),
            _ => Err(ExchangeError::not_granted("invalid credentials", None)),
        }
    }
}

impl From<&UserEntity> for UserDto {
    fn from(other: &UserEntity) -> Self {
        Self {
            user_id: other.user_id.to_string(),
            name: other.name.to_string(),
            email: other.email.to_string(),
            role: other.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::auth::domain::{AuthService, Registration};
    use crate::auth::domain::service::AuthServiceImpl;
    use crate::core::domain::Configuration;
    use crate::core::exchange::{ExchangeError, UserRole};
    use crate::users::repository::memory_user_repository::MemoryUserRepository;
    use crate::users::repository::UserRepository;

    fn auth_service(users: &MemoryUserRepository) -> AuthServiceImpl {
        AuthServiceImpl::new(&Configuration::new("test"), Box::new(users.clone()))
    }

    fn registration(email: &str) -> Registration {
        Registration {
            name: "alice".to_string(),
            mobile: "206-555-0100".to_string(),
            email: email.to_string(),
            password: "secret".to_string(),
            role: UserRole::Owner,
        }
    }

    #[tokio::test]
    async fn test_should_register_and_login() {
        let users = MemoryUserRepository::new();
        let auth_svc = auth_service(&users);

        let profile = auth_svc.register(&registration("alice@org.cc")).await.expect("should register user");
        assert_eq!("alice@org.cc", profile.email.as_str());
        assert_eq!(UserRole::Owner, profile.role);

        let logged_in = auth_svc.login("alice@org.cc", "secret").await.expect("should login user");
        assert_eq!(profile.user_id, logged_in.user_id);
    }

    #[tokio::test]
    async fn test_should_reject_duplicate_email() {
        let users = MemoryUserRepository::new();
        let auth_svc = auth_service(&users);

        let _ = auth_svc.register(&registration("alice@org.cc")).await.expect("should register user");
        let res = auth_svc.register(&registration("alice@org.cc")).await;
        assert!(matches!(res, Err(ExchangeError::DuplicateKey { message: _ })));

        // only one account persisted
        let persisted = users.find_by_email("alice@org.cc").await.expect("should return users");
        assert_eq!(1, persisted.len());
    }

    #[tokio::test]
    async fn test_should_reject_bad_credentials() {
        let users = MemoryUserRepository::new();
        let auth_svc = auth_service(&users);
        let _ = auth_svc.register(&registration("alice@org.cc")).await.expect("should register user");

        let res = auth_svc.login("alice@org.cc", "wrong").await;
        assert!(matches!(res, Err(ExchangeError::NotGranted { message: _, reason_code: _ })));
        let res = auth_svc.login("carol@org.cc", "secret").await;
        assert!(matches!(res, Err(ExchangeError::NotGranted { message: _, reason_code: _ })));
    }

    #[tokio::test]
    async fn test_should_compare_password_verbatim() {
        let users = MemoryUserRepository::new();
        let auth_svc = auth_service(&users);
        let _ = auth_svc.register(&registration("alice@org.cc")).await.expect("should register user");

        let res = auth_svc.login("alice@org.cc", "Secret").await;
        assert!(res.is_err());
        let res = auth_svc.login("alice@org.cc", "secret ").await;
        assert!(res.is_err());
    }

    #[tokio::test]
    async fn test_should_reject_registration_without_email_or_password() {
        let users = MemoryUserRepository::new();
        let auth_svc = auth_service(&users);

        let mut missing_email = registration("");
        missing_email.email = "".to_string();
        let res = auth_svc.register(&missing_email).await;
        assert!(matches!(res, Err(ExchangeError::Validation { message: _, reason_code: _ })));

        let mut missing_password = registration("alice@org.cc");
        missing_password.password = "".to_string();
        let res = auth_svc.register(&missing_password).await;
        assert!(matches!(res, Err(ExchangeError::Validation { message: _, reason_code: _ })));
    }
}
