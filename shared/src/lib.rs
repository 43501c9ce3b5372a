//! Shared types for the Mealdesk admin console
//!
//! Entities and payloads exchanged with the admin REST API, the response
//! envelope, the pagination contract and the error codes. Used by both
//! mealdesk-client and mealdesk-mock.

pub mod error;
pub mod models;
pub mod response;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use response::{Envelope, ListPage, Pagination};
