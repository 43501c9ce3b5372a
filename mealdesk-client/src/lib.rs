//! Mealdesk Client - typed HTTP client for the admin REST API
//!
//! [`AdminClient`] wraps an [`HttpClient`] transport and exposes one method per
//! admin endpoint through the [`AdminApi`] trait. Two transports exist:
//! [`NetworkHttpClient`] (reqwest, cookie session) and, with the `in-process`
//! feature, [`OneshotHttpClient`] which calls an axum `Router` directly.

pub mod api;
pub mod config;
pub mod error;
pub mod http;
#[cfg(feature = "in-process")]
pub mod http_oneshot;
pub mod query;

pub use api::{AdminApi, AdminClient};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{FileUpload, HttpClient, NetworkHttpClient};
#[cfg(feature = "in-process")]
pub use http_oneshot::OneshotHttpClient;
pub use query::{MappingQuery, PricingQuery, Query, SearchQuery};

// Re-export shared types for convenience
pub use shared::{Envelope, ListPage, Pagination};
