//! Client error types

use shared::error::ErrorCode;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Server answered `success: false`
    #[error("{0}")]
    Rejected(String),

    /// Structured error body returned with a non-2xx status
    #[error("{message}")]
    Api {
        status: u16,
        code: Option<u16>,
        message: String,
    },

    /// Authentication required
    #[error("Authentication required")]
    Unauthorized,

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Local file could not be read for upload
    #[error("File error: {0}")]
    File(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Backend error code, when the server sent a known one
    pub fn error_code(&self) -> Option<ErrorCode> {
        match self {
            Self::Api {
                code: Some(code), ..
            } => ErrorCode::try_from(*code).ok(),
            _ => None,
        }
    }

    /// Message suitable for showing to the operator
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected(message) | Self::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Error body sent with non-2xx responses
#[derive(Debug, serde::Deserialize)]
pub(crate) struct ApiErrorResponse {
    #[serde(default)]
    pub code: Option<u16>,
    pub message: String,
}

/// Map a non-2xx status and body to a [`ClientError`]
pub(crate) fn status_error(status: u16, text: String) -> ClientError {
    if let Ok(api_err) = serde_json::from_str::<ApiErrorResponse>(&text) {
        return ClientError::Api {
            status,
            code: api_err.code,
            message: api_err.message,
        };
    }
    match status {
        401 => ClientError::Unauthorized,
        403 => ClientError::Forbidden(text),
        404 => ClientError::NotFound(text),
        400 | 422 => ClientError::Validation(text),
        _ => ClientError::Internal(text),
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
