//! Site endpoints

use serde::Deserialize;
use serde_json::Value;
use shared::Envelope;
use shared::models::{Site, SiteCreate, SiteReparent, SiteUpdate};

use super::open;
use crate::ClientResult;
use crate::http::HttpClient;

const BASE: &str = "/api/admin/sites";

#[derive(Deserialize)]
struct SitesBody {
    sites: Vec<Site>,
}

#[derive(Deserialize)]
struct SiteBody {
    site: Site,
}

/// GET /api/admin/sites (flat)
pub(super) async fn list<H: HttpClient>(http: &H) -> ClientResult<Vec<Site>> {
    let value: Value = http.get(BASE).await?;
    open::<SitesBody>(value).map(|b| b.sites)
}

/// GET /api/admin/sites/tree (nested `children`)
pub(super) async fn tree<H: HttpClient>(http: &H) -> ClientResult<Vec<Site>> {
    let value: Value = http.get(&format!("{}/tree", BASE)).await?;
    open::<SitesBody>(value).map(|b| b.sites)
}

/// POST /api/admin/sites
pub(super) async fn create<H: HttpClient>(http: &H, data: &SiteCreate) -> ClientResult<Site> {
    let value: Value = http.post(BASE, data).await?;
    open::<SiteBody>(value).map(|b| b.site)
}

/// PUT /api/admin/sites/{id}
pub(super) async fn update<H: HttpClient>(http: &H, id: i64, data: &SiteUpdate) -> ClientResult<Site> {
    let value: Value = http.put(&format!("{}/{}", BASE, id), data).await?;
    open::<SiteBody>(value).map(|b| b.site)
}

/// PATCH /api/admin/sites/{id} - move under another parent
pub(super) async fn reparent<H: HttpClient>(
    http: &H,
    id: i64,
    parent_id: Option<i64>,
) -> ClientResult<Site> {
    let value: Value = http
        .patch(&format!("{}/{}", BASE, id), &SiteReparent { parent_id })
        .await?;
    open::<SiteBody>(value).map(|b| b.site)
}

/// DELETE /api/admin/sites/{id}
pub(super) async fn delete<H: HttpClient>(http: &H, id: i64) -> ClientResult<()> {
    let value: Value = http.delete(&format!("{}/{}", BASE, id)).await?;
    open::<Envelope>(value).map(|_| ())
}
