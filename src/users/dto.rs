use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;
use crate::core::exchange::UserRole;

// UserDto is the public profile returned by auth operations; the password is
// never echoed back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserDto {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

// OwnerDto is the owner summary attached to enriched books.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OwnerDto {
    pub user_id: String,
    pub name: String,
    pub email: String,
}

impl Identifiable for UserDto {
    fn id(&self) -> String {
        self.user_id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use crate::core::exchange::UserRole;
    use crate::users::dto::UserDto;

    #[tokio::test]
    async fn test_should_serialize_profile_without_password() {
        let dto = UserDto {
            user_id: "u1".to_string(),
            name: "alice".to_string(),
            email: "alice@org.cc".to_string(),
            role: UserRole::Owner,
        };
        let json = serde_json::to_string(&dto).expect("should serialize");
        assert!(json.contains("\"userId\":\"u1\""));
        assert!(json.contains("\"role\":\"Owner\""));
        assert!(!json.contains("password"));
    }
}
