//! Error type and its JSON envelope

use super::category::ErrorCategory;
use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Admin API error
///
/// `field` names the form input the error belongs to, so a console can put
/// the message next to it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
    pub field: Option<String>,
}

impl AppError {
    /// Error with the code's default message
    pub fn new(code: ErrorCode) -> Self {
        Self::coded(code, code.message())
    }

    /// Error with a specific message
    pub fn coded(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            field: None,
        }
    }

    /// Attach the offending form field
    pub fn on_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// `<code message> (#id)` for a row that does not exist
    pub fn missing(code: ErrorCode, id: i64) -> Self {
        Self::coded(code, format!("{} (#{})", code.message(), id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::coded(ErrorCode::ValidationFailed, message)
    }

    pub fn required(field: &str) -> Self {
        Self::coded(ErrorCode::RequiredField, format!("{} is required", field)).on_field(field)
    }

    pub fn not_authenticated() -> Self {
        Self::new(ErrorCode::NotAuthenticated)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::coded(ErrorCode::InternalError, message)
    }

    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }
}

/// Result type alias with [`AppError`]
pub type AppResult<T> = Result<T, AppError>;

/// Body of an error response
///
/// `success` is always `false` so clients that only branch on it still see
/// the failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub success: bool,
    pub code: u16,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl From<&AppError> for ErrorBody {
    fn from(err: &AppError) -> Self {
        Self {
            success: false,
            code: err.code.code(),
            message: err.message.clone(),
            field: err.field.clone(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.http_status();
        match self.code.category() {
            ErrorCategory::System => {
                tracing::error!(code = %self.code, message = %self.message, "admin request failed")
            }
            _ => tracing::debug!(code = %self.code, message = %self.message, "admin request refused"),
        }
        (status, axum::Json(ErrorBody::from(&self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_message_comes_from_code() {
        let err = AppError::new(ErrorCode::SiteNotFound);
        assert_eq!(err.message, "Site not found");
        assert_eq!(err.field, None);
    }

    #[test]
    fn test_missing_names_the_row() {
        let err = AppError::missing(ErrorCode::SupplierNotFound, 9);
        assert_eq!(err.message, "Supplier not found (#9)");
        assert_eq!(err.http_status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_required_points_at_field() {
        let err = AppError::required("supplier_code");
        assert_eq!(err.code, ErrorCode::RequiredField);
        assert_eq!(err.field.as_deref(), Some("supplier_code"));
    }

    #[test]
    fn test_error_body_marks_failure() {
        let err = AppError::new(ErrorCode::MappingDuplicate);
        let json = serde_json::to_value(ErrorBody::from(&err)).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["code"], 5102);
        assert!(json.get("field").is_none());

        let json = serde_json::to_value(ErrorBody::from(&AppError::required("name"))).unwrap();
        assert_eq!(json["field"], "name");
    }
}
