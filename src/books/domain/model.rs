use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::books::domain::Book;
use crate::core::domain::Identifiable;
use crate::core::exchange::BookStatus;
use crate::utils::date::serializer;

// BookEntity abstracts a physical book offered on the exchange. The image url
// and the image id share one lifecycle: both present after an upload, both
// absent otherwise.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct BookEntity {
    pub book_id: String,
    pub title: String,
    pub author: String,
    pub genre: Option<String>,
    pub location: String,
    pub contact: String,
    pub image_url: Option<String>,
    // opaque handle required to delete the remote image later
    pub image_id: Option<String>,
    pub status: BookStatus,
    pub owner_id: String,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl BookEntity {
    pub fn new(title: &str, author: &str, location: &str, contact: &str, owner_id: &str) -> Self {
        Self {
            book_id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            author: author.to_string(),
            genre: None,
            location: location.to_string(),
            contact: contact.to_string(),
            image_url: None,
            image_id: None,
            status: BookStatus::Available,
            owner_id: owner_id.to_string(),
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }
}

impl Identifiable for BookEntity {
    fn id(&self) -> String {
        self.book_id.to_string()
    }
}

impl Book for BookEntity {
    fn status(&self) -> BookStatus {
        self.status
    }

    fn owned_by(&self, user_id: &str) -> bool {
        self.owner_id == user_id
    }
}

#[cfg(test)]
mod tests {
    use crate::books::domain::Book;
    use crate::books::domain::model::BookEntity;
    use crate::core::exchange::BookStatus;

    #[tokio::test]
    async fn test_should_build_book() {
        let book = BookEntity::new("Dune", "Frank Herbert", "Seattle", "555-0100", "u1");
        assert_eq!("Dune", book.title.as_str());
        assert_eq!(BookStatus::Available, book.status());
        assert_eq!(None, book.genre);
        assert_eq!(None, book.image_url);
        assert_eq!(None, book.image_id);
    }

    #[tokio::test]
    async fn test_should_match_owner_exactly() {
        let book = BookEntity::new("Dune", "Frank Herbert", "Seattle", "555-0100", "u1");
        assert!(book.owned_by("u1"));
        assert!(!book.owned_by("u2"));
        assert!(!book.owned_by("u1 "));
        assert!(!book.owned_by("U1"));
        assert!(!book.owned_by(""));
    }
}
