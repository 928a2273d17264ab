use async_trait::async_trait;
use crate::core::exchange::ExchangeError;

#[derive(Debug)]
pub enum CommandError {
    Access {
        message: String,
        reason_code: Option<String>,
    },
    Authentication {
        message: String,
        reason_code: Option<String>,
    },
    Database {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    DuplicateKey {
        message: String,
    },
    NotFound {
        message: String,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    Serialization {
        message: String,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
    },
    Other {
        message: String,
        reason_code: Option<String>,
    },
}

#[async_trait]
pub trait Command<Request, Response> {
    async fn execute(&self, req: Request) -> Result<Response, CommandError>;
}

impl From<ExchangeError> for CommandError {
    fn from(other: ExchangeError) -> Self {
        match other {
            ExchangeError::Database { message, reason_code, retryable } => {
                CommandError::Database { message, reason_code, retryable }
            }
            ExchangeError::AccessDenied { message, reason_code } => {
                CommandError::Access { message, reason_code }
            }
            ExchangeError::NotGranted { message, reason_code } => {
                CommandError::Authentication { message, reason_code }
            }
            ExchangeError::DuplicateKey { message } => {
                CommandError::DuplicateKey { message }
            }
            ExchangeError::NotFound { message } => {
                CommandError::NotFound { message }
            }
            ExchangeError::CurrentlyUnavailable { message, reason_code, retryable } => {
                CommandError::Runtime { message, reason_code, retryable }
            }
            ExchangeError::Validation { message, reason_code } => {
                CommandError::Validation { message, reason_code }
            }
            ExchangeError::Serialization { message } => {
                CommandError::Serialization { message }
            }
            ExchangeError::Runtime { message, reason_code } => {
                CommandError::Runtime { message, reason_code, retryable: true }
            }
        }
    }
}
