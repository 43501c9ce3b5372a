//! Session handlers

use axum::{Json, extract::State};
use shared::Envelope;

use super::done;
use crate::state::SharedBackend;

/// POST /api/auth/logout
pub async fn logout(State(backend): State<SharedBackend>) -> Json<Envelope> {
    backend.write().await.session_active = false;
    tracing::info!("session closed");
    done("Logged out")
}
