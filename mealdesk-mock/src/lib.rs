//! Mealdesk Mock - in-memory admin backend
//!
//! Implements the admin REST contract on top of an in-memory store so the
//! client and the console can be exercised without the real backend.
//! Integration tests drive [`router`] in-process; the `mealdesk-mock` binary
//! serves it over TCP for local demos.
//!
//! Tests arrange the store through [`MockData`] and can make the next
//! matching request fail with `success: false` via
//! [`MockBackend::reject_next`].

pub mod api;
pub mod state;

pub use api::router;
pub use state::{MockBackend, MockData, SharedBackend};
