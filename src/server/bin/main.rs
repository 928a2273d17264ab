include!("../../lib.rs");
use std::net::SocketAddr;
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use crate::auth::controller::{login_user, register_user};
use crate::core::controller::AppState;
use crate::core::repository::RepositoryStore;
use crate::listing::controller::{add_book, find_books, find_my_listings, remove_book, update_book, update_book_status};
use crate::utils::ddb::setup_tracing;

const DEV_MODE: bool = true;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();

    let state = if DEV_MODE {
        AppState::new("dev", RepositoryStore::InMemory).await
    } else {
        AppState::new("prod", RepositoryStore::DynamoDB).await
    };
    let port = state.config.http_port;

    let app = Router::new()
        .route("/", get(|| async { "API Running" }))
        .route("/auth/register", post(register_user))
        .route("/auth/login", post(login_user))
        .route("/books", get(find_books).post(add_book))
        .route("/books/my-listings/:user_id", get(find_my_listings))
        .route("/books/:id", put(update_book))
        .route("/books/:id/status", put(update_book_status))
        .route("/books/:id/:owner_id", delete(remove_book))
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("listening on {}", addr);
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await?;
    Ok(())
}
