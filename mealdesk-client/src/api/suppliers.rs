//! Supplier endpoints

use serde::Deserialize;
use serde_json::Value;
use shared::models::{Supplier, SupplierCreate, SupplierUpdate};
use shared::{Envelope, ListPage};

use super::{Counts, open};
use crate::ClientResult;
use crate::http::HttpClient;
use crate::query::SearchQuery;

const BASE: &str = "/api/admin/suppliers";

#[derive(Deserialize)]
struct SuppliersBody {
    suppliers: Vec<Supplier>,
    #[serde(flatten)]
    counts: Counts,
}

#[derive(Deserialize)]
struct SupplierBody {
    supplier: Supplier,
}

pub(super) async fn list<H: HttpClient>(
    http: &H,
    query: &SearchQuery,
) -> ClientResult<ListPage<Supplier>> {
    let value: Value = http.get(&query.to_query().to_path(BASE)).await?;
    let body: SuppliersBody = open(value)?;
    Ok(body.counts.page(body.suppliers))
}

pub(super) async fn create<H: HttpClient>(http: &H, data: &SupplierCreate) -> ClientResult<Supplier> {
    let value: Value = http.post(BASE, data).await?;
    open::<SupplierBody>(value).map(|b| b.supplier)
}

pub(super) async fn update<H: HttpClient>(
    http: &H,
    id: i64,
    data: &SupplierUpdate,
) -> ClientResult<Supplier> {
    let value: Value = http.put(&format!("{}/{}", BASE, id), data).await?;
    open::<SupplierBody>(value).map(|b| b.supplier)
}

pub(super) async fn delete<H: HttpClient>(http: &H, id: i64) -> ClientResult<()> {
    let value: Value = http.delete(&format!("{}/{}", BASE, id)).await?;
    open::<Envelope>(value).map(|_| ())
}
