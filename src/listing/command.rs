pub mod add_book_cmd;
pub mod get_my_listings_cmd;
pub mod remove_book_cmd;
pub mod search_books_cmd;
pub mod update_book_cmd;
pub mod update_book_status_cmd;
