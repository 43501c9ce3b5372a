//! Supplier mapping endpoints

use serde::Deserialize;
use serde_json::Value;
use shared::models::{SupplierMapping, SupplierMappingCreate, SupplierMappingUpdate};
use shared::{Envelope, ListPage};

use super::{Counts, open};
use crate::ClientResult;
use crate::http::HttpClient;
use crate::query::MappingQuery;

const BASE: &str = "/api/admin/customer-supplier-mappings";

#[derive(Deserialize)]
struct MappingsBody {
    mappings: Vec<SupplierMapping>,
    #[serde(flatten)]
    counts: Counts,
}

#[derive(Deserialize)]
struct MappingBody {
    mapping: SupplierMapping,
}

pub(super) async fn list<H: HttpClient>(
    http: &H,
    query: &MappingQuery,
) -> ClientResult<ListPage<SupplierMapping>> {
    let value: Value = http.get(&query.to_query().to_path(BASE)).await?;
    let body: MappingsBody = open(value)?;
    Ok(body.counts.page(body.mappings))
}

pub(super) async fn create<H: HttpClient>(
    http: &H,
    data: &SupplierMappingCreate,
) -> ClientResult<SupplierMapping> {
    let value: Value = http.post(BASE, data).await?;
    open::<MappingBody>(value).map(|b| b.mapping)
}

pub(super) async fn update<H: HttpClient>(
    http: &H,
    id: i64,
    data: &SupplierMappingUpdate,
) -> ClientResult<SupplierMapping> {
    let value: Value = http.put(&format!("{}/{}", BASE, id), data).await?;
    open::<MappingBody>(value).map(|b| b.mapping)
}

pub(super) async fn delete<H: HttpClient>(http: &H, id: i64) -> ClientResult<()> {
    let value: Value = http.delete(&format!("{}/{}", BASE, id)).await?;
    open::<Envelope>(value).map(|_| ())
}
