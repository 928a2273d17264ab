use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub enum ExchangeError {
    Database {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    AccessDenied {
        message: String,
        reason_code: Option<String>,
    },
    // NotGranted indicates that the caller's credentials were rejected, as opposed
    // to AccessDenied, which indicates the caller is not the resource owner.
    NotGranted {
        message: String,
        reason_code: Option<String>,
    },
    DuplicateKey {
        message: String,
    },
    NotFound {
        message: String,
    },
    CurrentlyUnavailable {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
    },
    Serialization {
        message: String,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
    },
}

impl ExchangeError {
    pub fn database(message: &str, reason_code: Option<String>, retryable: bool) -> ExchangeError {
        ExchangeError::Database { message: message.to_string(), reason_code, retryable }
    }

    pub fn access_denied(message: &str, reason_code: Option<String>) -> ExchangeError {
        ExchangeError::AccessDenied { message: message.to_string(), reason_code }
    }

    pub fn not_granted(message: &str, reason_code: Option<String>) -> ExchangeError {
        ExchangeError::NotGranted { message: message.to_string(), reason_code }
    }

    pub fn duplicate_key(message: &str) -> ExchangeError {
        ExchangeError::DuplicateKey { message: message.to_string() }
    }

    pub fn not_found(message: &str) -> ExchangeError {
        ExchangeError::NotFound { message: message.to_string() }
    }

    pub fn unavailable(message: &str, reason_code: Option<String>, retryable: bool) -> ExchangeError {
        ExchangeError::CurrentlyUnavailable { message: message.to_string(), reason_code, retryable }
    }

    pub fn database_or_unavailable(message: &str, reason: Option<String>, retryable: bool) -> ExchangeError {
        if retryable {
            ExchangeError::unavailable(
                format!("ddb database unavailable error {:?} {:?}", message, reason).as_str(), reason, true)
        } else if let Some(ref reason_val) = reason {
            if reason_val.as_str().contains("404") {
                ExchangeError::not_found(
                    format!("not found error {:?} {:?}", message, reason).as_str())
            } else if reason_val.as_str().contains("400") {
                ExchangeError::access_denied(
                    format!("access-denied error {:?} {:?}", message, reason).as_str(), reason)
            } else {
                ExchangeError::database(
                    format!("ddb database error {:?} {:?}", message, reason).as_str(), reason, false)
            }
        } else {
            ExchangeError::database(
                format!("ddb database error {:?} {:?}", message, reason).as_str(), reason, false)
        }
    }

    pub fn validation(message: &str, reason_code: Option<String>) -> ExchangeError {
        ExchangeError::Validation { message: message.to_string(), reason_code }
    }

    pub fn serialization(message: &str) -> ExchangeError {
        ExchangeError::Serialization { message: message.to_string() }
    }

    pub fn runtime(message: &str, reason_code: Option<String>) -> ExchangeError {
        ExchangeError::Runtime { message: message.to_string(), reason_code }
    }

    pub fn retryable(&self) -> bool {
        match self {
            ExchangeError::Database { retryable, .. } => { *retryable }
            ExchangeError::AccessDenied { .. } => { false }
            ExchangeError::NotGranted { .. } => { false }
            ExchangeError::DuplicateKey { .. } => { false }
            ExchangeError::NotFound { .. } => { false }
            ExchangeError::CurrentlyUnavailable { retryable, .. } => { *retryable }
            ExchangeError::Validation { .. } => { false }
            ExchangeError::Serialization { .. } => { false }
            ExchangeError::Runtime { .. } => { false }
        }
    }
}

impl From<std::io::Error> for ExchangeError {
    fn from(err: std::io::Error) -> Self {
        ExchangeError::runtime(
            format!("serde io {:?}", err).as_str(), None)
    }
}

impl From<serde_json::Error> for ExchangeError {
    fn from(err: serde_json::Error) -> Self {
        ExchangeError::serialization(
            format!("serde json parsing {:?}", err).as_str())
    }
}

impl From<String> for ExchangeError {
    fn from(err: String) -> Self {
        ExchangeError::serialization(
            format!("serde parsing {:?}", err).as_str())
    }
}

impl Display for ExchangeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ExchangeError::Database { message, reason_code, retryable } => {
                write!(f, "{} {:?} {}", message, reason_code, retryable)
            }
            ExchangeError::AccessDenied { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            ExchangeError::NotGranted { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            ExchangeError::DuplicateKey { message } => {
                write!(f, "{}", message)
            }
            ExchangeError::NotFound { message } => {
                write!(f, "{}", message)
            }
            ExchangeError::CurrentlyUnavailable { message, reason_code, retryable } => {
                write!(f, "{} {:?} {}", message, reason_code, retryable)
            }
            ExchangeError::Validation { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            ExchangeError::Serialization { message } => {
                write!(f, "{}", message)
            }
            ExchangeError::Runtime { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
        }
    }
}

/// A specialized Result type for repositories and services.
pub type ExchangeResult<T> = Result<T, ExchangeError>;

// It defines abstraction for paginated result
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    // The page number or token
    pub page: Option<String>,
    // page size
    pub page_size: usize,
    // Next page if available
    pub next_page: Option<String>,
    // list of records
    pub records: Vec<T>,
}

impl<T> PaginatedResult<T> {
    pub(crate) fn new(page: Option<&str>, page_size: usize,
                      next_page: Option<String>, records: Vec<T>) -> Self {
        PaginatedResult {
            page: page.map(str::to_string),
            page_size,
            next_page,
            records,
        }
    }
}

// BookStatus tracks whether a listing is still open; only the two values below
// are accepted anywhere in the system.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub(crate) enum BookStatus {
    Available,
    #[serde(rename = "Rented/Exchanged")]
    RentedOrExchanged,
}

impl BookStatus {
    pub fn parse(s: &str) -> Option<BookStatus> {
        match s {
            "Available" => Some(BookStatus::Available),
            "Rented/Exchanged" => Some(BookStatus::RentedOrExchanged),
            _ => None,
        }
    }
}

impl Display for BookStatus {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            BookStatus::Available => write!(f, "Available"),
            BookStatus::RentedOrExchanged => write!(f, "Rented/Exchanged"),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub(crate) enum UserRole {
    Owner,
    Seeker,
}

impl From<String> for UserRole {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Owner" => UserRole::Owner,
            _ => UserRole::Seeker,
        }
    }
}

impl Display for UserRole {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            UserRole::Owner => write!(f, "Owner"),
            UserRole::Seeker => write!(f, "Seeker"),
        }
    }
}
