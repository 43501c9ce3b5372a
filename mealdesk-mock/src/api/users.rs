//! User handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde_json::Value;
use shared::Envelope;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{PasswordReset, User, UserCreate, UserUpdate};

use super::{ListParams, data, done, matches_any, paged};
use crate::state::{SharedBackend, next_id};

const MIN_PASSWORD_LEN: usize = 4;

fn check_password(password: &str) -> AppResult<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::coded(
            ErrorCode::PasswordTooShort,
            format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
        ));
    }
    Ok(())
}

/// GET /api/admin/users
pub async fn list(
    State(backend): State<SharedBackend>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Value>> {
    let store = backend.read().await;
    let needle = params.needle();
    let users: Vec<&User> = store
        .users
        .iter()
        .filter(|u| {
            matches_any(
                needle.as_deref(),
                &[
                    Some(u.username.as_str()),
                    u.department.as_deref(),
                    u.managed_site.as_deref(),
                ],
            )
        })
        .collect();
    paged(&store, "users", users, params.page, params.limit)
}

/// POST /api/admin/users
pub async fn create(
    State(backend): State<SharedBackend>,
    Json(payload): Json<UserCreate>,
) -> AppResult<Json<Value>> {
    let username = payload.username.trim().to_string();
    if username.is_empty() {
        return Err(AppError::required("username"));
    }
    check_password(&payload.password)?;

    let mut store = backend.write().await;
    if store.users.iter().any(|u| u.username == username) {
        return Err(AppError::coded(
            ErrorCode::UsernameExists,
            format!("Username '{}' is already taken", username),
        ));
    }

    let id = next_id(store.users.iter().map(|u| u.id));
    let user = User {
        id,
        username,
        role: payload.role,
        department: payload.department,
        phone_number: payload.phone_number,
        assigned_sites_count: u32::from(payload.managed_site.is_some()),
        managed_site: payload.managed_site,
        is_active: payload.is_active.unwrap_or(true),
    };
    store.users.push(user.clone());
    store.passwords.insert(id, payload.password);

    tracing::info!(id, username = %user.username, "user created");
    data("user", user)
}

/// PUT /api/admin/users/{id}
pub async fn update(
    State(backend): State<SharedBackend>,
    Path(id): Path<i64>,
    Json(payload): Json<UserUpdate>,
) -> AppResult<Json<Value>> {
    let mut store = backend.write().await;
    if let Some(username) = &payload.username {
        if store.users.iter().any(|u| u.id != id && &u.username == username) {
            return Err(AppError::coded(
                ErrorCode::UsernameExists,
                format!("Username '{}' is already taken", username),
            ));
        }
    }

    let user = store
        .users
        .iter_mut()
        .find(|u| u.id == id)
        .ok_or_else(|| AppError::missing(ErrorCode::UserNotFound, id))?;
    if let Some(username) = payload.username {
        user.username = username;
    }
    if let Some(role) = payload.role {
        user.role = role;
    }
    if let Some(department) = payload.department {
        user.department = department;
    }
    if let Some(phone_number) = payload.phone_number {
        user.phone_number = phone_number;
    }
    match payload.managed_site {
        Some(Some(managed_site)) => {
            user.managed_site = Some(managed_site);
            user.assigned_sites_count = user.assigned_sites_count.max(1);
        }
        Some(None) => {
            user.managed_site = None;
            user.assigned_sites_count = 0;
        }
        None => {}
    }
    if let Some(is_active) = payload.is_active {
        user.is_active = is_active;
    }

    tracing::info!(id, "user updated");
    data("user", user.clone())
}

/// DELETE /api/admin/users/{id}
pub async fn delete(
    State(backend): State<SharedBackend>,
    Path(id): Path<i64>,
) -> AppResult<Json<Envelope>> {
    let mut store = backend.write().await;
    let before = store.users.len();
    store.users.retain(|u| u.id != id);
    if store.users.len() == before {
        return Err(AppError::missing(ErrorCode::UserNotFound, id));
    }
    store.passwords.remove(&id);
    tracing::info!(id, "user deleted");
    Ok(done("User deleted"))
}

/// POST /api/admin/users/{id}/reset-password
pub async fn reset_password(
    State(backend): State<SharedBackend>,
    Path(id): Path<i64>,
    Json(payload): Json<PasswordReset>,
) -> AppResult<Json<Envelope>> {
    check_password(&payload.new_password)?;
    let mut store = backend.write().await;
    if !store.users.iter().any(|u| u.id == id) {
        return Err(AppError::missing(ErrorCode::UserNotFound, id));
    }
    store.passwords.insert(id, payload.new_password);
    tracing::info!(id, "password reset");
    Ok(done("Password reset"))
}
