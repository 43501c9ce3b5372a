//! Customer-supplier mapping handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use serde_json::Value;
use shared::Envelope;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{SupplierMapping, SupplierMappingCreate, SupplierMappingUpdate};

use super::{data, done, paged};
use crate::state::{MockData, SharedBackend, next_id};

#[derive(Debug, Default, Deserialize)]
pub struct MappingParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub supplier_id: Option<i64>,
    #[serde(alias = "site_id")]
    pub customer_id: Option<i64>,
    pub is_active: Option<bool>,
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Required fields and referenced rows
fn check_mapping(
    store: &MockData,
    id: Option<i64>,
    supplier_id: i64,
    customer_id: i64,
    supplier_code: &str,
) -> AppResult<()> {
    if supplier_code.trim().is_empty() {
        return Err(AppError::new(ErrorCode::SupplierCodeRequired).on_field("supplier_code"));
    }
    if store.supplier(supplier_id).is_none() {
        return Err(AppError::missing(ErrorCode::SupplierNotFound, supplier_id)
            .on_field("supplier_id"));
    }
    if store.site(customer_id).is_none() {
        return Err(AppError::missing(ErrorCode::SiteNotFound, customer_id)
            .on_field("customer_id"));
    }
    let duplicate = store.mappings.iter().any(|m| {
        Some(m.id) != id && m.supplier_id == supplier_id && m.customer_id == customer_id
    });
    if duplicate {
        return Err(AppError::new(ErrorCode::MappingDuplicate));
    }
    Ok(())
}

/// Fill the display names list rows carry
fn with_names(store: &MockData, mapping: &SupplierMapping) -> SupplierMapping {
    SupplierMapping {
        supplier_name: store.supplier(mapping.supplier_id).map(|s| s.name.clone()),
        customer_name: store.site(mapping.customer_id).map(|s| s.name.clone()),
        ..mapping.clone()
    }
}

/// GET /api/admin/customer-supplier-mappings
pub async fn list(
    State(backend): State<SharedBackend>,
    Query(params): Query<MappingParams>,
) -> AppResult<Json<Value>> {
    let store = backend.read().await;
    let mappings: Vec<SupplierMapping> = store
        .mappings
        .iter()
        .filter(|m| params.supplier_id.is_none_or(|id| m.supplier_id == id))
        .filter(|m| params.customer_id.is_none_or(|id| m.customer_id == id))
        .filter(|m| params.is_active.is_none_or(|active| m.is_active == active))
        .map(|m| with_names(&store, m))
        .collect();
    paged(&store, "mappings", mappings, params.page, params.limit)
}

/// POST /api/admin/customer-supplier-mappings
pub async fn create(
    State(backend): State<SharedBackend>,
    Json(payload): Json<SupplierMappingCreate>,
) -> AppResult<Json<Value>> {
    let mut store = backend.write().await;
    check_mapping(
        &store,
        None,
        payload.supplier_id,
        payload.customer_id,
        &payload.supplier_code,
    )?;

    let mapping = SupplierMapping {
        id: next_id(store.mappings.iter().map(|m| m.id)),
        supplier_id: payload.supplier_id,
        customer_id: payload.customer_id,
        supplier_code: payload.supplier_code.trim().to_string(),
        delivery_code: blank_to_none(payload.delivery_code),
        is_active: payload.is_active.unwrap_or(true),
        created_at: Some(
            chrono::Local::now()
                .naive_local()
                .format("%Y-%m-%dT%H:%M:%S")
                .to_string(),
        ),
        supplier_name: None,
        customer_name: None,
    };
    store.mappings.push(mapping.clone());

    tracing::info!(
        id = mapping.id,
        supplier_id = mapping.supplier_id,
        customer_id = mapping.customer_id,
        "mapping created"
    );
    data("mapping", with_names(&store, &mapping))
}

/// PUT /api/admin/customer-supplier-mappings/{id}
pub async fn update(
    State(backend): State<SharedBackend>,
    Path(id): Path<i64>,
    Json(payload): Json<SupplierMappingUpdate>,
) -> AppResult<Json<Value>> {
    let mut store = backend.write().await;
    let current = store
        .mappings
        .iter()
        .find(|m| m.id == id)
        .cloned()
        .ok_or_else(|| AppError::missing(ErrorCode::MappingNotFound, id))?;

    let supplier_id = payload.supplier_id.unwrap_or(current.supplier_id);
    let customer_id = payload.customer_id.unwrap_or(current.customer_id);
    let supplier_code = payload
        .supplier_code
        .map(|c| c.trim().to_string())
        .unwrap_or(current.supplier_code);
    check_mapping(&store, Some(id), supplier_id, customer_id, &supplier_code)?;

    let mapping = store
        .mappings
        .iter_mut()
        .find(|m| m.id == id)
        .ok_or_else(|| AppError::missing(ErrorCode::MappingNotFound, id))?;
    mapping.supplier_id = supplier_id;
    mapping.customer_id = customer_id;
    mapping.supplier_code = supplier_code;
    if let Some(delivery_code) = payload.delivery_code {
        mapping.delivery_code = blank_to_none(delivery_code);
    }
    if let Some(is_active) = payload.is_active {
        mapping.is_active = is_active;
    }
    let mapping = mapping.clone();

    tracing::info!(id, "mapping updated");
    data("mapping", with_names(&store, &mapping))
}

/// DELETE /api/admin/customer-supplier-mappings/{id}
pub async fn delete(
    State(backend): State<SharedBackend>,
    Path(id): Path<i64>,
) -> AppResult<Json<Envelope>> {
    let mut store = backend.write().await;
    let before = store.mappings.len();
    store.mappings.retain(|m| m.id != id);
    if store.mappings.len() == before {
        return Err(AppError::missing(ErrorCode::MappingNotFound, id));
    }
    tracing::info!(id, "mapping deleted");
    Ok(done("Mapping deleted"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_mapping() {
        let store = MockData::seeded();
        assert!(check_mapping(&store, None, 2, 4, "CJ-1").is_ok());
        assert_eq!(
            check_mapping(&store, None, 2, 4, "  ").unwrap_err().code,
            ErrorCode::SupplierCodeRequired
        );
        assert_eq!(
            check_mapping(&store, None, 1, 4, "FM-1").unwrap_err().code,
            ErrorCode::MappingDuplicate
        );
        // the row itself is not a duplicate of itself
        assert!(check_mapping(&store, Some(1), 1, 4, "FM-1").is_ok());
        assert_eq!(
            check_mapping(&store, None, 9, 4, "X").unwrap_err().code,
            ErrorCode::SupplierNotFound
        );
    }

    #[test]
    fn test_site_id_alias_in_query() {
        let params: MappingParams =
            serde_json::from_value(serde_json::json!({"site_id": 4})).unwrap();
        assert_eq!(params.customer_id, Some(4));
    }
}
