use std::cmp;
use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::AttributeValue;
use chrono::Utc;

use crate::books::domain::model::BookEntity;
use crate::books::repository::BookRepository;
use crate::core::exchange::{BookStatus, ExchangeError, ExchangeResult, PaginatedResult};
use crate::core::repository::Repository;
use crate::utils::ddb::{add_filter_expr, from_ddb, opt_string_attribute, parse_date_attribute, parse_item, parse_opt_string_attribute, parse_string_attribute, string_date, to_ddb_page};

#[derive(Debug)]
pub(crate) struct DDBBookRepository {
    client: Client,
    table_name: String,
    index_name: String,
}

impl DDBBookRepository {
    pub(crate) fn new(client: Client, table_name: &str, index_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
            index_name: index_name.to_string(),
        }
    }
}

#[async_trait]
impl Repository<BookEntity> for DDBBookRepository {
    async fn create(&self, entity: &BookEntity) -> ExchangeResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        let val = serde_json::to_value(entity)?;
        let mut item = parse_item(val)?;
        // lowercased shadow attributes back the case-insensitive search scan
        item.insert("title_search".to_string(), AttributeValue::S(entity.title.to_lowercase()));
        item.insert("location_search".to_string(), AttributeValue::S(entity.location.to_lowercase()));
        self.client
            .put_item()
            .table_name(table_name)
            .condition_expression("attribute_not_exists(book_id)")
            .set_item(Some(item))
            .send()
            .await.map(|_| 1).map_err(ExchangeError::from)
    }

    async fn update(&self, entity: &BookEntity) -> ExchangeResult<usize> {
        let now = Utc::now().naive_utc();
        let table_name: &str = self.table_name.as_ref();

        // "status" and "location" are DynamoDB reserved words, hence the placeholders.
        // No version guard: concurrent updates to the same book are last-write-wins.
        self.client
            .update_item()
            .table_name(table_name)
            .key("book_id", AttributeValue::S(entity.book_id.clone()))
            .update_expression("SET title = :title, author = :author, genre = :genre, #location = :location, contact = :contact, image_url = :image_url, image_id = :image_id, #status = :status, title_search = :title_search, location_search = :location_search, updated_at = :updated_at")
            .expression_attribute_names("#location", "location")
            .expression_attribute_names("#status", "status")
            .expression_attribute_values(":title", AttributeValue::S(entity.title.to_string()))
            .expression_attribute_values(":author", AttributeValue::S(entity.author.to_string()))
            .expression_attribute_values(":genre", opt_string_attribute(&entity.genre))
            .expression_attribute_values(":location", AttributeValue::S(entity.location.to_string()))
            .expression_attribute_values(":contact", AttributeValue::S(entity.contact.to_string()))
            .expression_attribute_values(":image_url", opt_string_attribute(&entity.image_url))
            .expression_attribute_values(":image_id", opt_string_attribute(&entity.image_id))
            .expression_attribute_values(":status", AttributeValue::S(entity.status.to_string()))
            .expression_attribute_values(":title_search", AttributeValue::S(entity.title.to_lowercase()))
            .expression_attribute_values(":location_search", AttributeValue::S(entity.location.to_lowercase()))
            .expression_attribute_values(":updated_at", string_date(now))
            .condition_expression("attribute_exists(book_id)")
            .send()
            .await.map(|_| 1).map_err(ExchangeError::from)
    }

    async fn get(&self, id: &str) -> ExchangeResult<BookEntity> {
        let table_name: &str = self.table_name.as_ref();
        self.client
            .query()
            .table_name(table_name)
            .limit(2)
            .consistent_read(true)
            .key_condition_expression(
                "book_id = :book_id",
            )
            .expression_attribute_values(
                ":book_id",
                AttributeValue::S(id.to_string()),
            )
            .send()
            .await.map_err(ExchangeError::from).and_then(|req| {
            if let Some(items) = req.items {
                if items.len() > 1 {
                    return Err(ExchangeError::database(format!("too many books for {}", id).as_str(), None, false));
                } else if !items.is_empty() {
                    if let Some(map) = items.first() {
                        return Ok(map_to_book(map));
                    }
                }
                Err(ExchangeError::not_found(format!("book not found for {}", id).as_str()))
            } else {
                Err(ExchangeError::not_found(format!("book not found for {}", id).as_str()))
            }
        })
    }

    async fn delete(&self, id: &str) -> ExchangeResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        self.client.delete_item()
            .table_name(table_name)
            .key("book_id", AttributeValue::S(id.to_string()))
            .send()
            .await.map(|_| 1).map_err(ExchangeError::from)
    }

    // Note you cannot use certain reserved words per https://docs.aws.amazon.com/amazondynamodb/latest/developerguide/ReservedWords.html
    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> ExchangeResult<PaginatedResult<BookEntity>> {
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
            .expression_attribute_values(":owner_id", AttributeValue::S(
                predicate.get("owner_id").unwrap_or(&String::new()).to_string()
            ));
        // handle GSI keys first
        let mut key_cond = String::new();
        key_cond.push_str("owner_id = :owner_id");

        if let Some(status) = predicate.get("status") {
            key_cond.push_str(" AND #status = :status");
            request = request.expression_attribute_names("#status", "status");
            request = request.expression_attribute_values(":status", AttributeValue::S(status.to_string()));
        }
        request = request.key_condition_expression(key_cond);
        let mut filter_expr = String::new();
        // then handle other filters
        for (k, v) in predicate {
            if k != "owner_id" && k != "status" {
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
                .map(map_to_book).collect();
            from_ddb(page, page_size, req.last_evaluated_key(), records)
        })
    }
}

#[async_trait]
impl BookRepository for DDBBookRepository {
    async fn find_by_owner_id(&self, owner_id: &str) -> ExchangeResult<Vec<BookEntity>> {
        let predicate = HashMap::from([
            ("owner_id".to_string(), owner_id.to_string()),
        ]);
        let mut records = vec![];
        let mut page: Option<String> = None;
        loop {
            let res = self.query(&predicate, page.as_deref(), 100).await?;
            records.extend(res.records);
            match res.next_page {
                Some(next) => page = Some(next),
                None => break,
            }
        }
        Ok(records)
    }

    async fn search(&self, title: Option<&str>, location: Option<&str>) -> ExchangeResult<Vec<BookEntity>> {
        let table_name: &str = self.table_name.as_ref();
        let mut records = vec![];
        let mut exclusive_start_key: Option<HashMap<String, AttributeValue>> = None;
        loop {
            let mut request = self.client
                .scan()
                .table_name(table_name)
                .consistent_read(false)
                .set_exclusive_start_key(exclusive_start_key.clone());
            let mut filter_expr = String::new();
            if let Some(title) = title {
                filter_expr.push_str("contains(title_search, :title)");
                request = request.expression_attribute_values(":title", AttributeValue::S(title.to_lowercase()));
            }
            if let Some(location) = location {
                if !filter_expr.is_empty() {
                    filter_expr.push_str(" AND ");
                }
                filter_expr.push_str("contains(location_search, :location)");
                request = request.expression_attribute_values(":location", AttributeValue::S(location.to_lowercase()));
            }
            if !filter_expr.is_empty() {
                request = request.filter_expression(filter_expr);
            }
            let resp = request.send().await.map_err(ExchangeError::from)?;
            records.extend(resp.items.as_ref().unwrap_or(&vec![]).iter().map(map_to_book));
            match resp.last_evaluated_key() {
                Some(key) if !key.is_empty() => exclusive_start_key = Some(key.clone()),
                _ => break,
            }
        }
        Ok(records)
    }
}

fn map_to_book(map: &HashMap<String, AttributeValue>) -> BookEntity {
    BookEntity {
        book_id: parse_string_attribute("book_id", map).unwrap_or(String::from("")),
        title: parse_string_attribute("title", map).unwrap_or(String::from("")),
        author: parse_string_attribute("author", map).unwrap_or(String::from("")),
        genre: parse_opt_string_attribute("genre", map),
        location: parse_string_attribute("location", map).unwrap_or(String::from("")),
        contact: parse_string_attribute("contact", map).unwrap_or(String::from("")),
        image_url: parse_opt_string_attribute("image_url", map),
        image_id: parse_opt_string_attribute("image_id", map),
        status: BookStatus::parse(parse_string_attribute("status", map).unwrap_or(String::from("")).as_str())
            .unwrap_or(BookStatus::Available),
        owner_id: parse_string_attribute("owner_id", map).unwrap_or(String::from("")),
        created_at: parse_date_attribute("created_at", map).unwrap_or(Utc::now().naive_utc()),
        updated_at: parse_date_attribute("updated_at", map).unwrap_or(Utc::now().naive_utc()),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use crate::books::domain::model::BookEntity;
    use crate::books::repository::ddb_book_repository::map_to_book;
    use crate::core::exchange::BookStatus;
    use crate::utils::ddb::parse_item;

    #[tokio::test]
    async fn test_should_map_item_to_book() {
        let mut book = BookEntity::new("Dune", "Frank Herbert", "Seattle", "555-0100", "u1");
        book.genre = Some("Sci-Fi".to_string());
        book.image_url = Some("https://img/dune.jpg".to_string());
        book.image_id = Some("img-1".to_string());
        book.status = BookStatus::RentedOrExchanged;
        let val = serde_json::to_value(&book).expect("should serialize book");
        let item = parse_item(val).expect("should parse item");
        let mapped = map_to_book(&item);
        assert_eq!(book, mapped);
    }

    #[tokio::test]
    async fn test_should_default_missing_attributes() {
        let mapped = map_to_book(&HashMap::new());
        assert_eq!("", mapped.book_id.as_str());
        assert_eq!(BookStatus::Available, mapped.status);
        assert_eq!(None, mapped.genre);
        assert_eq!(None, mapped.image_id);
    }
}
