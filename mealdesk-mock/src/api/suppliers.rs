//! Supplier handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde_json::Value;
use shared::Envelope;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Supplier, SupplierCreate, SupplierUpdate};

use super::{ListParams, data, done, matches_any, paged};
use crate::state::{SharedBackend, next_id};

/// GET /api/admin/suppliers
pub async fn list(
    State(backend): State<SharedBackend>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Value>> {
    let store = backend.read().await;
    let needle = params.needle();
    let suppliers: Vec<&Supplier> = store
        .suppliers
        .iter()
        .filter(|s| {
            matches_any(
                needle.as_deref(),
                &[
                    Some(s.name.as_str()),
                    s.parent_code.as_deref(),
                    s.business_number.as_deref(),
                ],
            )
        })
        .collect();
    paged(&store, "suppliers", suppliers, params.page, params.limit)
}

/// POST /api/admin/suppliers
pub async fn create(
    State(backend): State<SharedBackend>,
    Json(payload): Json<SupplierCreate>,
) -> AppResult<Json<Value>> {
    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::required("name"));
    }

    let mut store = backend.write().await;
    let supplier = Supplier {
        id: next_id(store.suppliers.iter().map(|s| s.id)),
        name,
        parent_code: payload.parent_code,
        business_number: payload.business_number,
        representative: payload.representative,
        headquarters_address: payload.headquarters_address,
        headquarters_phone: payload.headquarters_phone,
        email: payload.email,
        is_active: payload.is_active.unwrap_or(true),
    };
    store.suppliers.push(supplier.clone());

    tracing::info!(id = supplier.id, name = %supplier.name, "supplier created");
    data("supplier", supplier)
}

/// PUT /api/admin/suppliers/{id}
pub async fn update(
    State(backend): State<SharedBackend>,
    Path(id): Path<i64>,
    Json(payload): Json<SupplierUpdate>,
) -> AppResult<Json<Value>> {
    let mut store = backend.write().await;
    let supplier = store
        .suppliers
        .iter_mut()
        .find(|s| s.id == id)
        .ok_or_else(|| AppError::missing(ErrorCode::SupplierNotFound, id))?;

    if let Some(name) = payload.name {
        supplier.name = name;
    }
    if let Some(parent_code) = payload.parent_code {
        supplier.parent_code = parent_code;
    }
    if let Some(business_number) = payload.business_number {
        supplier.business_number = business_number;
    }
    if let Some(representative) = payload.representative {
        supplier.representative = representative;
    }
    if let Some(address) = payload.headquarters_address {
        supplier.headquarters_address = address;
    }
    if let Some(phone) = payload.headquarters_phone {
        supplier.headquarters_phone = phone;
    }
    if let Some(email) = payload.email {
        supplier.email = email;
    }
    if let Some(is_active) = payload.is_active {
        supplier.is_active = is_active;
    }

    tracing::info!(id, "supplier updated");
    data("supplier", supplier.clone())
}

/// DELETE /api/admin/suppliers/{id}
///
/// Mappings of the supplier go with it.
pub async fn delete(
    State(backend): State<SharedBackend>,
    Path(id): Path<i64>,
) -> AppResult<Json<Envelope>> {
    let mut store = backend.write().await;
    let before = store.suppliers.len();
    store.suppliers.retain(|s| s.id != id);
    if store.suppliers.len() == before {
        return Err(AppError::missing(ErrorCode::SupplierNotFound, id));
    }
    store.mappings.retain(|m| m.supplier_id != id);

    tracing::info!(id, "supplier deleted");
    Ok(done("Supplier deleted"))
}
