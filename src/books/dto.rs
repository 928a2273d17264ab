use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use crate::books::domain::Book;
use crate::core::domain::Identifiable;
use crate::core::exchange::BookStatus;
use crate::users::dto::OwnerDto;
use crate::utils::date::serializer;

// BookDto is the wire form of a listing; the owner reference is expanded to a
// summary when the record is returned by the listing service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BookDto {
    pub book_id: String,
    pub title: String,
    pub author: String,
    pub genre: Option<String>,
    pub location: String,
    pub contact: String,
    pub image_url: Option<String>,
    pub image_id: Option<String>,
    pub status: BookStatus,
    pub owner_id: String,
    pub owner: Option<OwnerDto>,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl Identifiable for BookDto {
    fn id(&self) -> String {
        self.book_id.to_string()
    }
}

impl Book for BookDto {
    fn status(&self) -> BookStatus {
        self.status
    }

    fn owned_by(&self, user_id: &str) -> bool {
        self.owner_id == user_id
    }
}
