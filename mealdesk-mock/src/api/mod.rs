//! Admin REST routes of the mock backend

mod auth;
mod ingredients;
mod mappings;
mod meal_pricing;
mod sites;
mod suppliers;
mod users;

use axum::{
    Json, Router,
    extract::{Request, State},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use shared::Envelope;
use shared::error::{AppError, AppResult};

use crate::state::{MockData, SharedBackend};

/// Page size used when a list request carries no `limit`
const DEFAULT_LIMIT: u32 = 20;

pub fn router(backend: SharedBackend) -> Router {
    let admin = Router::new()
        .route("/users", get(users::list).post(users::create))
        .route("/users/{id}", put(users::update).delete(users::delete))
        .route("/users/{id}/reset-password", post(users::reset_password))
        .route("/sites", get(sites::list).post(sites::create))
        .route("/sites/tree", get(sites::tree))
        .route(
            "/sites/{id}",
            put(sites::update)
                .patch(sites::reparent)
                .delete(sites::delete),
        )
        .route("/suppliers", get(suppliers::list).post(suppliers::create))
        .route(
            "/suppliers/{id}",
            put(suppliers::update).delete(suppliers::delete),
        )
        .route(
            "/customer-supplier-mappings",
            get(mappings::list).post(mappings::create),
        )
        .route(
            "/customer-supplier-mappings/{id}",
            put(mappings::update).delete(mappings::delete),
        )
        .route(
            "/meal-pricing",
            get(meal_pricing::list).post(meal_pricing::create),
        )
        .route(
            "/meal-pricing/{id}",
            put(meal_pricing::update).delete(meal_pricing::delete),
        )
        .route("/upload-ingredients", post(ingredients::upload));

    Router::new()
        .nest("/api/admin", admin)
        .route("/api/auth/logout", post(auth::logout))
        .layer(middleware::from_fn_with_state(backend.clone(), guard))
        .with_state(backend)
}

/// Records the request, applies injected faults and the session check
async fn guard(State(backend): State<SharedBackend>, request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let line = match request.uri().query() {
        Some(query) => format!("{} {}?{}", method, path, query),
        None => format!("{} {}", method, path),
    };
    tracing::debug!(request = %line, "mock request");
    backend.record(line).await;

    if let Some(message) = backend.take_fault(&method, &path).await {
        tracing::info!(%method, %path, "rejecting request on purpose");
        return Json(Envelope::fail(message)).into_response();
    }

    if path.starts_with("/api/admin") && !backend.read().await.session_active {
        return AppError::not_authenticated().into_response();
    }

    next.run(request).await
}

/// `?page=&limit=&search=` of the user and supplier lists
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
}

impl ListParams {
    /// Lower-cased search term, `None` when blank
    pub fn needle(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }
}

/// Case-insensitive match of `needle` against any of `fields`
pub(crate) fn matches_any(needle: Option<&str>, fields: &[Option<&str>]) -> bool {
    match needle {
        None => true,
        Some(needle) => fields
            .iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(needle)),
    }
}

/// `{"success": true, <key>: value}`
pub(crate) fn data<T: Serialize>(key: &str, value: T) -> AppResult<Json<Value>> {
    let value = serde_json::to_value(value)
        .map_err(|e| AppError::internal(format!("Failed to encode {}: {}", key, e)))?;
    let mut body = Map::new();
    body.insert("success".to_string(), Value::Bool(true));
    body.insert(key.to_string(), value);
    Ok(Json(Value::Object(body)))
}

/// `{"success": true, "message": message}`
pub(crate) fn done(message: impl Into<String>) -> Json<Envelope> {
    Json(Envelope::ok(message))
}

/// One page of `items` under `key`, with `total_count` and `total_pages`
///
/// Sends everything without counts when [`MockData::paginate`] is off.
pub(crate) fn paged<T: Serialize>(
    store: &MockData,
    key: &str,
    items: Vec<T>,
    page: Option<u32>,
    limit: Option<u32>,
) -> AppResult<Json<Value>> {
    if !store.paginate {
        return data(key, items);
    }
    let limit = limit.filter(|l| *l > 0).unwrap_or(DEFAULT_LIMIT) as usize;
    let page = page.filter(|p| *p > 0).unwrap_or(1) as usize;
    let total_count = items.len();
    let total_pages = total_count.div_ceil(limit);
    let rows: Vec<T> = items
        .into_iter()
        .skip((page - 1) * limit)
        .take(limit)
        .collect();

    let Json(mut body) = data(key, rows)?;
    if let Value::Object(map) = &mut body {
        map.insert("total_count".to_string(), total_count.into());
        map.insert("total_pages".to_string(), total_pages.into());
    }
    Ok(Json(body))
}
