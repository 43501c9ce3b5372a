//! Error codes shared by the admin backend contract and the console
//!
//! Codes are grouped by leading digit, see [`super::ErrorCategory`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Serialized as a bare `u16` so it can travel inside the JSON envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 7,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Session has expired
    SessionExpired = 1005,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Admin role required
    AdminRequired = 2003,

    // ==================== 3xxx: User ====================
    /// User not found
    UserNotFound = 3001,
    /// Username already taken
    UsernameExists = 3002,
    /// Password does not meet the policy
    PasswordTooShort = 3003,

    // ==================== 4xxx: Site ====================
    /// Site not found
    SiteNotFound = 4001,
    /// Site still has child sites
    SiteHasChildren = 4002,
    /// Parent violates the head → detail → customer hierarchy
    InvalidSiteParent = 4003,

    // ==================== 5xxx: Supplier ====================
    /// Supplier not found
    SupplierNotFound = 5001,
    /// Supplier mapping not found
    MappingNotFound = 5101,
    /// A mapping for this supplier and site already exists
    MappingDuplicate = 5102,
    /// Supplier code missing or blank
    SupplierCodeRequired = 5103,

    // ==================== 6xxx: Meal pricing ====================
    /// Meal pricing record not found
    PricingNotFound = 6001,
    /// Negative or otherwise invalid price
    InvalidPrice = 6002,

    // ==================== 7xxx: Ingredient upload ====================
    /// No file in the multipart request
    NoFileProvided = 7001,
    /// Uploaded file is empty
    EmptyFile = 7002,
    /// File is not a spreadsheet
    UnsupportedFileFormat = 7003,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Network failure
    NetworkError = 9002,
    /// Request timed out
    TimeoutError = 9003,
}

impl ErrorCode {
    /// Numeric value of the code
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Default human-readable message
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",
            Self::RequiredField => "Required field missing",

            Self::NotAuthenticated => "Authentication required",
            Self::SessionExpired => "Session expired",

            Self::PermissionDenied => "Permission denied",
            Self::AdminRequired => "Admin role required",

            Self::UserNotFound => "User not found",
            Self::UsernameExists => "Username already exists",
            Self::PasswordTooShort => "Password is too short",

            Self::SiteNotFound => "Site not found",
            Self::SiteHasChildren => "Site still has child sites",
            Self::InvalidSiteParent => "Invalid parent for this site type",

            Self::SupplierNotFound => "Supplier not found",
            Self::MappingNotFound => "Supplier mapping not found",
            Self::MappingDuplicate => "Mapping already exists for this supplier and site",
            Self::SupplierCodeRequired => "Supplier code is required",

            Self::PricingNotFound => "Meal pricing not found",
            Self::InvalidPrice => "Invalid price",

            Self::NoFileProvided => "No file provided",
            Self::EmptyFile => "File is empty",
            Self::UnsupportedFileFormat => "Unsupported file format",

            Self::InternalError => "Internal server error",
            Self::NetworkError => "Network error",
            Self::TimeoutError => "Request timed out",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Returned when a numeric value does not name a known [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid error code: {0}")]
pub struct InvalidErrorCode(pub u16);

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => Self::Success,
            1 => Self::Unknown,
            2 => Self::ValidationFailed,
            3 => Self::NotFound,
            4 => Self::AlreadyExists,
            5 => Self::InvalidRequest,
            7 => Self::RequiredField,
            1001 => Self::NotAuthenticated,
            1005 => Self::SessionExpired,
            2001 => Self::PermissionDenied,
            2003 => Self::AdminRequired,
            3001 => Self::UserNotFound,
            3002 => Self::UsernameExists,
            3003 => Self::PasswordTooShort,
            4001 => Self::SiteNotFound,
            4002 => Self::SiteHasChildren,
            4003 => Self::InvalidSiteParent,
            5001 => Self::SupplierNotFound,
            5101 => Self::MappingNotFound,
            5102 => Self::MappingDuplicate,
            5103 => Self::SupplierCodeRequired,
            6001 => Self::PricingNotFound,
            6002 => Self::InvalidPrice,
            7001 => Self::NoFileProvided,
            7002 => Self::EmptyFile,
            7003 => Self::UnsupportedFileFormat,
            9001 => Self::InternalError,
            9002 => Self::NetworkError,
            9003 => Self::TimeoutError,
            other => return Err(InvalidErrorCode(other)),
        };
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_round_trips_through_u16() {
        for code in [
            ErrorCode::Success,
            ErrorCode::InvalidSiteParent,
            ErrorCode::SupplierCodeRequired,
            ErrorCode::TimeoutError,
        ] {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_unknown_value_is_rejected() {
        assert_eq!(ErrorCode::try_from(4999), Err(InvalidErrorCode(4999)));
    }

    #[test]
    fn test_display_is_padded() {
        assert_eq!(ErrorCode::NotFound.to_string(), "E0003");
        assert_eq!(ErrorCode::SiteNotFound.to_string(), "E4001");
    }

    #[test]
    fn test_serializes_as_number() {
        let json = serde_json::to_string(&ErrorCode::MappingDuplicate).unwrap();
        assert_eq!(json, "5102");
        let code: ErrorCode = serde_json::from_str("6002").unwrap();
        assert_eq!(code, ErrorCode::InvalidPrice);
    }
}
