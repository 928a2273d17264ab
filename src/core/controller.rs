use std::sync::Arc;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use crate::auth::domain::AuthService;
use crate::auth::factory::create_auth_service;
use crate::core::command::CommandError;
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::listing::domain::ListingService;
use crate::listing::factory::create_listing_service;

// AppState carries the services built once at startup; repositories and the
// image store live behind them with an explicit lifecycle instead of ambient
// process-wide handles.
#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) config: Configuration,
    pub(crate) listing: Arc<dyn ListingService>,
    pub(crate) auth: Arc<dyn AuthService>,
}

impl AppState {
    pub async fn new(env: &str, store: RepositoryStore) -> AppState {
        let config = Configuration::new(env);
        let listing = create_listing_service(&config, store).await;
        let auth = create_auth_service(&config, store).await;
        AppState {
            config,
            listing,
            auth,
        }
    }
}

// ErrorBody is the wire form of a failed request: a machine-readable kind plus
// a human-readable message, with no internals leaked to the caller.
#[derive(Debug, Serialize)]
pub(crate) struct ErrorBody {
    pub kind: String,
    pub message: String,
}

#[derive(Debug)]
pub(crate) struct ServerError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl ServerError {
    pub fn new(status: StatusCode, kind: &str, message: &str) -> ServerError {
        ServerError {
            status,
            body: ErrorBody { kind: kind.to_string(), message: message.to_string() },
        }
    }

    pub fn validation(message: &str) -> ServerError {
        ServerError::new(StatusCode::BAD_REQUEST, "validation", message)
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

pub fn json_to_server_error(err: serde_json::Error) -> ServerError {
    ServerError::validation(format!("{}", err).as_str())
}

impl From<CommandError> for ServerError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Access { message, .. } => {
                ServerError::new(StatusCode::FORBIDDEN, "authorization", message.as_str())
            }
            CommandError::Authentication { message, .. } => {
                ServerError::new(StatusCode::UNAUTHORIZED, "authentication", message.as_str())
            }
            CommandError::Database { message, .. } => {
                ServerError::new(StatusCode::INTERNAL_SERVER_ERROR, "infrastructure", message.as_str())
            }
            CommandError::DuplicateKey { message } => {
                ServerError::new(StatusCode::CONFLICT, "conflict", message.as_str())
            }
            CommandError::NotFound { message } => {
                ServerError::new(StatusCode::NOT_FOUND, "not_found", message.as_str())
            }
            CommandError::Runtime { message, .. } => {
                ServerError::new(StatusCode::INTERNAL_SERVER_ERROR, "infrastructure", message.as_str())
            }
            CommandError::Serialization { message } => {
                ServerError::new(StatusCode::BAD_REQUEST, "validation", message.as_str())
            }
            CommandError::Validation { message, .. } => {
                ServerError::new(StatusCode::BAD_REQUEST, "validation", message.as_str())
            }
            CommandError::Other { message, .. } => {
                ServerError::new(StatusCode::INTERNAL_SERVER_ERROR, "infrastructure", message.as_str())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use crate::core::command::CommandError;
    use crate::core::controller::ServerError;

    #[tokio::test]
    async fn test_should_map_command_errors_to_status_codes() {
        let err = ServerError::from(CommandError::Validation { message: "owner id is required".to_string(), reason_code: None });
        assert_eq!(StatusCode::BAD_REQUEST, err.status);
        assert_eq!("validation", err.body.kind.as_str());

        let err = ServerError::from(CommandError::Access { message: "not yours".to_string(), reason_code: None });
        assert_eq!(StatusCode::FORBIDDEN, err.status);

        let err = ServerError::from(CommandError::Authentication { message: "invalid credentials".to_string(), reason_code: None });
        assert_eq!(StatusCode::UNAUTHORIZED, err.status);

        let err = ServerError::from(CommandError::NotFound { message: "book not found".to_string() });
        assert_eq!(StatusCode::NOT_FOUND, err.status);

        let err = ServerError::from(CommandError::DuplicateKey { message: "user already exists".to_string() });
        assert_eq!(StatusCode::CONFLICT, err.status);

        let err = ServerError::from(CommandError::Database { message: "down".to_string(), reason_code: None, retryable: false });
        assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, err.status);
    }

    #[tokio::test]
    async fn test_should_keep_message_without_internals() {
        let err = ServerError::from(CommandError::NotFound { message: "book not found for b1".to_string() });
        assert_eq!("book not found for b1", err.body.message.as_str());
    }
}
