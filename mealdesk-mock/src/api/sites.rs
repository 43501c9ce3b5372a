//! Site handlers
//!
//! Placement follows the head → detail → customer hierarchy. A site may
//! also sit at the root.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::Value;
use shared::Envelope;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Site, SiteCreate, SiteReparent, SiteTier, SiteType, SiteUpdate};

use super::{data, done};
use crate::state::{MockData, SharedBackend, next_id};

fn invalid_parent(message: impl Into<String>) -> AppError {
    AppError::coded(ErrorCode::InvalidSiteParent, message)
}

/// Check that a site of `site_type` may sit under `parent_id`
///
/// `moving` is the id of an existing site being reparented.
fn check_placement(
    store: &MockData,
    site_type: Option<&SiteType>,
    parent_id: Option<i64>,
    moving: Option<i64>,
) -> AppResult<()> {
    let Some(parent_id) = parent_id else {
        return Ok(());
    };
    if moving == Some(parent_id) {
        return Err(invalid_parent("A site cannot be its own parent"));
    }
    let parent = store
        .site(parent_id)
        .ok_or_else(|| AppError::missing(ErrorCode::SiteNotFound, parent_id))?;

    match site_type.and_then(SiteType::tier) {
        Some(SiteTier::Head) => Err(invalid_parent("A head office cannot have a parent")),
        Some(tier) if parent.tier() == tier.parent() => Ok(()),
        Some(tier) => Err(invalid_parent(format!(
            "A {} site must sit under a {} site",
            tier.default_type().as_str(),
            tier.parent().map(|p| p.default_type()).unwrap_or(SiteType::Head).as_str()
        ))),
        None if moving.is_some() => Err(invalid_parent(
            "Sites without a known type cannot be moved",
        )),
        None => Ok(()),
    }
}

/// Nest flat sites under their parents; orphans become roots
fn nest(sites: &[Site]) -> Vec<Site> {
    fn children_of(sites: &[Site], parent_id: i64) -> Vec<Site> {
        sites
            .iter()
            .filter(|s| s.parent_id == Some(parent_id))
            .map(|s| Site {
                children: children_of(sites, s.id),
                ..s.clone()
            })
            .collect()
    }

    sites
        .iter()
        .filter(|s| match s.parent_id {
            None => true,
            Some(pid) => !sites.iter().any(|p| p.id == pid),
        })
        .map(|s| Site {
            children: children_of(sites, s.id),
            ..s.clone()
        })
        .collect()
}

/// GET /api/admin/sites
pub async fn list(State(backend): State<SharedBackend>) -> AppResult<Json<Value>> {
    let store = backend.read().await;
    data("sites", &store.sites)
}

/// GET /api/admin/sites/tree
pub async fn tree(State(backend): State<SharedBackend>) -> AppResult<Json<Value>> {
    let store = backend.read().await;
    data("sites", nest(&store.sites))
}

/// POST /api/admin/sites
pub async fn create(
    State(backend): State<SharedBackend>,
    Json(payload): Json<SiteCreate>,
) -> AppResult<Json<Value>> {
    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::required("name"));
    }

    let mut store = backend.write().await;
    check_placement(&store, Some(&payload.site_type), payload.parent_id, None)?;

    let site = Site {
        id: next_id(store.sites.iter().map(|s| s.id)),
        name,
        site_type: Some(payload.site_type),
        code: payload.code,
        parent_id: payload.parent_id,
        is_active: payload.is_active.unwrap_or(true),
        contact_person: payload.contact_person,
        contact_phone: payload.contact_phone,
        address: payload.address,
        children: Vec::new(),
    };
    store.sites.push(site.clone());

    tracing::info!(id = site.id, name = %site.name, "site created");
    data("site", site)
}

/// PUT /api/admin/sites/{id}
pub async fn update(
    State(backend): State<SharedBackend>,
    Path(id): Path<i64>,
    Json(payload): Json<SiteUpdate>,
) -> AppResult<Json<Value>> {
    let mut store = backend.write().await;
    let parent_id = store
        .site(id)
        .ok_or_else(|| AppError::missing(ErrorCode::SiteNotFound, id))?
        .parent_id;
    if let Some(site_type) = &payload.site_type {
        check_placement(&store, Some(site_type), parent_id, None)?;
    }

    let site = store
        .sites
        .iter_mut()
        .find(|s| s.id == id)
        .ok_or_else(|| AppError::missing(ErrorCode::SiteNotFound, id))?;
    if let Some(name) = payload.name {
        site.name = name;
    }
    if let Some(site_type) = payload.site_type {
        site.site_type = Some(site_type);
    }
    if let Some(code) = payload.code {
        site.code = code;
    }
    if let Some(is_active) = payload.is_active {
        site.is_active = is_active;
    }
    if let Some(contact_person) = payload.contact_person {
        site.contact_person = contact_person;
    }
    if let Some(contact_phone) = payload.contact_phone {
        site.contact_phone = contact_phone;
    }
    if let Some(address) = payload.address {
        site.address = address;
    }

    tracing::info!(id, "site updated");
    data("site", site.clone())
}

/// PATCH /api/admin/sites/{id} - move under another parent
pub async fn reparent(
    State(backend): State<SharedBackend>,
    Path(id): Path<i64>,
    Json(payload): Json<SiteReparent>,
) -> AppResult<Json<Value>> {
    let mut store = backend.write().await;
    let site_type = store
        .site(id)
        .ok_or_else(|| AppError::missing(ErrorCode::SiteNotFound, id))?
        .site_type
        .clone();
    check_placement(&store, site_type.as_ref(), payload.parent_id, Some(id))?;

    let site = store
        .sites
        .iter_mut()
        .find(|s| s.id == id)
        .ok_or_else(|| AppError::missing(ErrorCode::SiteNotFound, id))?;
    site.parent_id = payload.parent_id;

    tracing::info!(id, parent_id = ?payload.parent_id, "site moved");
    data("site", site.clone())
}

/// DELETE /api/admin/sites/{id}
pub async fn delete(
    State(backend): State<SharedBackend>,
    Path(id): Path<i64>,
) -> AppResult<Json<Envelope>> {
    let mut store = backend.write().await;
    store.site(id).ok_or_else(|| AppError::missing(ErrorCode::SiteNotFound, id))?;
    if store.sites.iter().any(|s| s.parent_id == Some(id)) {
        return Err(AppError::coded(
            ErrorCode::SiteHasChildren,
            format!("Site {} still has child sites", id),
        ));
    }
    store.sites.retain(|s| s.id != id);
    store.mappings.retain(|m| m.customer_id != id);

    tracing::info!(id, "site deleted");
    Ok(done("Site deleted"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nest_builds_forest_and_keeps_orphans() {
        let mut store = MockData::seeded();
        let mut orphan = store.sites[5].clone();
        orphan.id = 99;
        orphan.parent_id = Some(404);
        store.sites.push(orphan);

        let forest = nest(&store.sites);
        assert_eq!(forest.len(), 2);
        assert_eq!(forest[0].name, "본사");
        assert_eq!(forest[0].children.len(), 2);
        assert_eq!(forest[0].children[0].children.len(), 2);
        assert_eq!(forest[1].id, 99);
    }

    #[test]
    fn test_placement_rules() {
        let store = MockData::seeded();
        // detail under head
        assert!(check_placement(&store, Some(&SiteType::Detail), Some(1), Some(3)).is_ok());
        // customer-tier category under detail
        assert!(check_placement(&store, Some(&SiteType::School), Some(3), Some(5)).is_ok());
        // customer under head
        assert!(check_placement(&store, Some(&SiteType::NursingHome), Some(1), Some(4)).is_err());
        // head never moves under anything
        assert!(check_placement(&store, Some(&SiteType::Head), Some(2), Some(1)).is_err());
        // self
        assert!(check_placement(&store, Some(&SiteType::Detail), Some(2), Some(2)).is_err());
        // unknown type
        let unknown = SiteType::from("warehouse".to_string());
        assert!(check_placement(&store, Some(&unknown), Some(2), Some(7)).is_err());
        assert!(check_placement(&store, Some(&unknown), Some(2), None).is_ok());
        // missing parent
        let err = check_placement(&store, Some(&SiteType::Detail), Some(404), None).unwrap_err();
        assert_eq!(err.code, ErrorCode::SiteNotFound);
    }
}
