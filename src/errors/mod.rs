/// Error handling module
///
/// Unified error responses. Validation failures carry stable message keys
/// consumed by the presentation layer; everything else carries prose.
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt;

pub const MISSING_ACCOUNT_ID: &str = "error.missing.account.id";
pub const INVALID_ACCOUNT_ID: &str = "error.invalid.account.id";

#[derive(Debug)]
pub enum ApiError {
    /// The `id` parameter was absent or blank.
    MissingAccountId,
    /// The `id` parameter was non-numeric, non-positive, or names no account.
    InvalidAccountId,
    BadRequest { reason: String },
    Internal { reason: String },
    ServiceUnavailable { details: String },
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Message key for validation failures, if this error has one.
    pub fn message_key(&self) -> Option<&'static str> {
        match self {
            ApiError::MissingAccountId => Some(MISSING_ACCOUNT_ID),
            ApiError::InvalidAccountId => Some(INVALID_ACCOUNT_ID),
            _ => None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::MissingAccountId => write!(f, "Missing account id"),
            ApiError::InvalidAccountId => write!(f, "Invalid account id"),
            ApiError::BadRequest { reason } => write!(f, "Bad request: {}", reason),
            ApiError::Internal { reason } => write!(f, "Internal error: {}", reason),
            ApiError::ServiceUnavailable { details } => {
                write!(f, "Service unavailable: {}", details)
            }
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingAccountId
            | ApiError::InvalidAccountId
            | ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let response = match self {
            ApiError::MissingAccountId | ApiError::InvalidAccountId => ErrorResponse {
                error: self.to_string(),
                message: self.message_key().map(str::to_string),
                details: None,
            },
            ApiError::BadRequest { reason } => ErrorResponse {
                error: "Bad request".to_string(),
                message: None,
                details: Some(reason.clone()),
            },
            ApiError::Internal { reason } => ErrorResponse {
                error: "Internal server error".to_string(),
                message: None,
                details: Some(reason.clone()),
            },
            ApiError::ServiceUnavailable { details } => ErrorResponse {
                error: "Service unavailable".to_string(),
                message: None,
                details: Some(details.clone()),
            },
        };
        HttpResponse::build(status).json(response)
    }
}
