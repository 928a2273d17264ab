use std::cmp;
use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::AttributeValue;
use chrono::Utc;

use crate::core::exchange::{ExchangeError, ExchangeResult, PaginatedResult, UserRole};
use crate::core::repository::Repository;
use crate::users::domain::model::UserEntity;
use crate::users::repository::UserRepository;
use crate::utils::ddb::{add_filter_expr, from_ddb, parse_date_attribute, parse_item, parse_string_attribute, string_date, to_ddb_page};

#[derive(Debug)]
pub(crate) struct DDBUserRepository {
    client: Client,
    table_name: String,
    index_name: String,
}

impl DDBUserRepository {
    pub(crate) fn new(client: Client, table_name: &str, index_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
            index_name: index_name.to_string(),
        }
    }
}

#[async_trait]
impl Repository<UserEntity> for DDBUserRepository {
    async fn create(&self, entity: &UserEntity) -> ExchangeResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        let val = serde_json::to_value(entity)?;
        self.client
            .put_item()
            .table_name(table_name)
            .condition_expression("attribute_not_exists(user_id)")
            .set_item(Some(parse_item(val)?))
            .send()
            .await.map(|_| 1).map_err(ExchangeError::from)
    }

    async fn update(&self, entity: &UserEntity) -> ExchangeResult<usize> {
        let now = Utc::now().naive_utc();
        let table_name: &str = self.table_name.as_ref();

        // "role" is a DynamoDB reserved word, hence the placeholder
        self.client
            .update_item()
            .table_name(table_name)
            .key("user_id", AttributeValue::S(entity.user_id.clone()))
            .update_expression("SET #name = :name, mobile = :mobile, email = :email, password = :password, #role = :role, updated_at = :updated_at")
            .expression_attribute_names("#name", "name")
            .expression_attribute_names("#role", "role")
            .expression_attribute_values(":name", AttributeValue::S(entity.name.to_string()))
            .expression_attribute_values(":mobile", AttributeValue::S(entity.mobile.to_string()))
            .expression_attribute_values(":email", AttributeValue::S(entity.email.to_string()))
            .expression_attribute_values(":password", AttributeValue::S(entity.password.to_string()))
            .expression_attribute_values(":role", AttributeValue::S(entity.role.to_string()))
            .expression_attribute_values(":updated_at", string_date(now))
            .condition_expression("attribute_exists(user_id)")
            .send()
            .await.map(|_| 1).map_err(ExchangeError::from)
    }

    async fn get(&self, id: &str) -> ExchangeResult<UserEntity> {
        let table_name: &str = self.table_name.as_ref();
        self.client
            .query()
            .table_name(table_name)
            .limit(2)
            .consistent_read(true)
            .key_condition_expression(
                "user_id = :user_id",
            )
            .expression_attribute_values(
                ":user_id",
                AttributeValue::S(id.to_string()),
            )
            .send()
            .await.map_err(ExchangeError::from).and_then(|req| {
            if let Some(items) = req.items {
                if items.len() > 1 {
                    return Err(ExchangeError::database(format!("too many users for {}", id).as_str(), None, false));
                } else if !items.is_empty() {
                    if let Some(map) = items.first() {
                        return Ok(map_to_user(map));
                    }
                }
                Err(ExchangeError::not_found(format!("user not found for {}", id).as_str()))
            } else {
                Err(ExchangeError::not_found(format!("user not found for {}", id).as_str()))
            }
        })
    }

    async fn delete(&self, id: &str) -> ExchangeResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        self.client.delete_item()
            .table_name(table_name)
            .key("user_id", AttributeValue::S(id.to_string()))
            .send()
            .await.map(|_| 1).map_err(ExchangeError::from)
    }

    // Note you cannot use certain reserved words per https://docs.aws.amazon.com/amazondynamodb/latest/developerguide/ReservedWords.html
    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> ExchangeResult<PaginatedResult<UserEntity>> {
        let table_name: &str = self.table_name.as_ref();
        let index_name: &str = self.index_name.as_ref();
        let exclusive_start_key = to_ddb_page(page, predicate);
        let mut request = self.client
            .query()
            .table_name(table_name)
            .index_name(index_name)
            .limit(cmp::min(page_size, 500) as i32)
            .consistent_read(false)
            .set_exclusive_start_key(exclusive_start_key)
            .expression_attribute_values(":email", AttributeValue::S(
                predicate.get("email").unwrap_or(&String::new()).to_string()
            ));
        // handle GSI keys first
        let mut key_cond = String::new();
        key_cond.push_str("email = :email");

        if let Some(role) = predicate.get("role") {
            key_cond.push_str(" AND #role = :role");
            request = request.expression_attribute_names("#role", "role");
            request = request.expression_attribute_values(":role", AttributeValue::S(role.to_string()));
        }
        request = request.key_condition_expression(key_cond);
        let mut filter_expr = String::new();
        // then handle other filters
        for (k, v) in predicate {
            if k != "email" && k != "role" {
                let ks = add_filter_expr(k.as_str(), &mut filter_expr);
                request = request.expression_attribute_values(format!(":{}", ks).as_str(), AttributeValue::S(v.to_string()));
            }
        }
        if !filter_expr.is_empty() {
            request = request.filter_expression(filter_expr);
        }
        request
            .send()
            .await.map_err(ExchangeError::from).map(|req| {
            let records = req.items.as_ref().unwrap_or(&vec![]).iter()
                .map(map_to_user).collect();
            from_ddb(page, page_size, req.last_evaluated_key(), records)
        })
    }
}

#[async_trait]
impl UserRepository for DDBUserRepository {
    async fn find_by_email(&self, email: &str) -> ExchangeResult<Vec<UserEntity>> {
        let predicate = HashMap::from([
            ("email".to_string(), email.to_string()),
        ]);
        let res = self.query(&predicate, None, 50).await?;
        Ok(res.records)
    }
}

fn map_to_user(map: &HashMap<String, AttributeValue>) -> UserEntity {
    UserEntity {
        user_id: parse_string_attribute("user_id", map).unwrap_or(String::from("")),
        name: parse_string_attribute("name", map).unwrap_or(String::from("")),
        mobile: parse_string_attribute("mobile", map).unwrap_or(String::from("")),
        email: parse_string_attribute("email", map).unwrap_or(String::from("")),
        password: parse_string_attribute("password", map).unwrap_or(String::from("")),
        role: UserRole::from(parse_string_attribute("role", map).unwrap_or(String::from(""))),
        created_at: parse_date_attribute("created_at", map).unwrap_or(Utc::now().naive_utc()),
        updated_at: parse_date_attribute("updated_at", map).unwrap_or(Utc::now().naive_utc()),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use crate::core::exchange::UserRole;
    use crate::users::domain::model::UserEntity;
    use crate::users::repository::ddb_user_repository::map_to_user;
    use crate::utils::ddb::parse_item;

    #[tokio::test]
    async fn test_should_map_item_to_user() {
        let user = UserEntity::new("alice", "206-555-0100", "alice@org.cc", "secret", UserRole::Owner);
        let val = serde_json::to_value(&user).expect("should serialize user");
        let item = parse_item(val).expect("should parse item");
        let mapped = map_to_user(&item);
        assert_eq!(user, mapped);
    }

    #[tokio::test]
    async fn test_should_default_missing_attributes() {
        let mapped = map_to_user(&HashMap::new());
        assert_eq!("", mapped.user_id.as_str());
        assert_eq!(UserRole::Seeker, mapped.role);
    }
}
