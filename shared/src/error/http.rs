//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,

            Self::NotFound
            | Self::UserNotFound
            | Self::SiteNotFound
            | Self::SupplierNotFound
            | Self::MappingNotFound
            | Self::PricingNotFound => StatusCode::NOT_FOUND,

            Self::AlreadyExists
            | Self::UsernameExists
            | Self::MappingDuplicate
            | Self::SiteHasChildren => StatusCode::CONFLICT,

            Self::NotAuthenticated | Self::SessionExpired => StatusCode::UNAUTHORIZED,

            Self::PermissionDenied | Self::AdminRequired => StatusCode::FORBIDDEN,

            // Transient, the client may retry
            Self::NetworkError | Self::TimeoutError => StatusCode::SERVICE_UNAVAILABLE,

            Self::InternalError | Self::Unknown => StatusCode::INTERNAL_SERVER_ERROR,

            _ => StatusCode::BAD_REQUEST,
        }
    }
}
