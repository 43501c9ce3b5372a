//! Unified error system for the admin API
//!
//! - [`ErrorCode`]: standardized numeric codes carried in error envelopes
//! - [`ErrorCategory`]: classification of codes by domain
//! - [`AppError`]: error with code, message and the offending form field
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: User errors
//! - 4xxx: Site errors
//! - 5xxx: Supplier and mapping errors
//! - 6xxx: Meal pricing errors
//! - 7xxx: Ingredient upload errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! let err = AppError::required("supplier_code");
//! assert_eq!(err.code, ErrorCode::RequiredField);
//! assert_eq!(err.field.as_deref(), Some("supplier_code"));
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult, ErrorBody};
