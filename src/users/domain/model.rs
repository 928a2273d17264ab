use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::core::domain::Identifiable;
use crate::core::exchange::UserRole;
use crate::utils::date::serializer;

// UserEntity abstracts a marketplace account; owners list books, seekers browse
// them. Accounts are created at registration and immutable afterwards.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct UserEntity {
    pub user_id: String,
    pub name: String,
    pub mobile: String,
    pub email: String,
    // stored and compared verbatim on login
    pub password: String,
    pub role: UserRole,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl UserEntity {
    pub fn new(name: &str, mobile: &str, email: &str, password: &str, role: UserRole) -> Self {
        Self {
            user_id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            mobile: mobile.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }
}

impl Identifiable for UserEntity {
    fn id(&self) -> String {
        self.user_id.to_string()
    }
}
