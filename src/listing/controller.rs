use axum::extract::{Multipart, Path, Query, State};
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::Json;
use serde_json::Value;
use crate::core::command::Command;
use crate::core::controller::{AppState, json_to_server_error, ServerError};
use crate::gateway::images::ImageFile;
use crate::listing::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest, AddBookCommandResponse};
use crate::listing::command::get_my_listings_cmd::{GetMyListingsCommand, GetMyListingsCommandRequest, GetMyListingsCommandResponse};
use crate::listing::command::remove_book_cmd::{RemoveBookCommand, RemoveBookCommandRequest, RemoveBookCommandResponse};
use crate::listing::command::search_books_cmd::{SearchBooksCommand, SearchBooksCommandRequest, SearchBooksCommandResponse};
use crate::listing::command::update_book_cmd::{UpdateBookCommand, UpdateBookCommandRequest, UpdateBookCommandResponse};
use crate::listing::command::update_book_status_cmd::{UpdateBookStatusCommand, UpdateBookStatusCommandRequest, UpdateBookStatusCommandResponse};
use crate::listing::domain::ListingFields;

pub(crate) async fn find_books(
    State(state): State<AppState>,
    Query(req): Query<SearchBooksCommandRequest>) -> Result<Json<SearchBooksCommandResponse>, ServerError> {
    let res = SearchBooksCommand::new(state.listing.clone()).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn find_my_listings(
    State(state): State<AppState>,
    Path(user_id): Path<String>) -> Result<Json<GetMyListingsCommandResponse>, ServerError> {
    let req = GetMyListingsCommandRequest { user_id };
    let res = GetMyListingsCommand::new(state.listing.clone()).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn add_book(
    State(state): State<AppState>,
    multipart: Multipart) -> Result<(StatusCode, Json<AddBookCommandResponse>), ServerError> {
    let form = parse_listing_form(multipart).await?;
    let req = AddBookCommandRequest {
        owner_id: form.owner_id,
        fields: form.fields,
        image: form.image,
    };
    let res = AddBookCommand::new(state.listing.clone()).execute(req).await?;
    Ok((StatusCode::CREATED, Json(res)))
}

pub(crate) async fn update_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
    multipart: Multipart) -> Result<Json<UpdateBookCommandResponse>, ServerError> {
    let form = parse_listing_form(multipart).await?;
    let req = UpdateBookCommandRequest {
        book_id,
        owner_id: form.owner_id,
        fields: form.fields,
        image: form.image,
    };
    let res = UpdateBookCommand::new(state.listing.clone()).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn update_book_status(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
    json: Json<Value>) -> Result<Json<UpdateBookStatusCommandResponse>, ServerError> {
    let mut req: UpdateBookStatusCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    req.book_id = book_id;
    let res = UpdateBookStatusCommand::new(state.listing.clone()).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn remove_book(
    State(state): State<AppState>,
    Path((book_id, owner_id)): Path<(String, String)>) -> Result<Json<RemoveBookCommandResponse>, ServerError> {
    let req = RemoveBookCommandRequest { book_id, owner_id };
    let res = RemoveBookCommand::new(state.listing.clone()).execute(req).await?;
    Ok(Json(res))
}

// the formats the store accepts, mirroring the old upload middleware
const ALLOWED_IMAGE_TYPES: [&str; 2] = ["image/jpeg", "image/png"];

struct ListingForm {
    owner_id: Option<String>,
    fields: ListingFields,
    image: Option<ImageFile>,
}

fn multipart_to_server_error(err: MultipartError) -> ServerError {
    ServerError::validation(format!("{}", err).as_str())
}

async fn parse_listing_form(mut multipart: Multipart) -> Result<ListingForm, ServerError> {
    let mut form = ListingForm {
        owner_id: None,
        fields: ListingFields::default(),
        image: None,
    };
    while let Some(field) = multipart.next_field().await.map_err(multipart_to_server_error)? {
        let name = field.name().unwrap_or_default().to_string();
        if name.as_str() == "bookImage" {
            let file_name = field.file_name().unwrap_or("upload").to_string();
            let content_type = field.content_type().unwrap_or_default().to_string();
            if !ALLOWED_IMAGE_TYPES.contains(&content_type.as_str()) {
                return Err(ServerError::validation(
                    format!("unsupported image type {}", content_type).as_str()));
            }
            let data = field.bytes().await.map_err(multipart_to_server_error)?.to_vec();
            form.image = Some(ImageFile { file_name, content_type, data });
        } else {
            let value = field.text().await.map_err(multipart_to_server_error)?;
            match name.as_str() {
                "title" => form.fields.title = Some(value),
                "author" => form.fields.author = Some(value),
                "genre" => form.fields.genre = Some(value),
                "location" => form.fields.location = Some(value),
                "contact" => form.fields.contact = Some(value),
                "ownerId" => form.owner_id = Some(value),
                // unknown fields are ignored, matching the old form handling
                _ => {}
            }
        }
    }
    Ok(form)
}
