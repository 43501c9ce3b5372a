//! Admin API
//!
//! One [`AdminApi`] method per admin endpoint. [`AdminClient`] implements it
//! over any [`HttpClient`] transport; page controllers depend on the trait
//! only.

mod auth;
mod ingredients;
mod mappings;
mod meal_pricing;
mod sites;
mod suppliers;
mod users;

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::models::{
    IngredientUploadResult, MealPricing, MealPricingCreate, MealPricingUpdate, Site, SiteCreate,
    SiteUpdate, Supplier, SupplierCreate, SupplierMapping, SupplierMappingCreate,
    SupplierMappingUpdate, SupplierUpdate, User, UserCreate, UserUpdate,
};
use shared::{Envelope, ListPage};

use crate::http::{FileUpload, HttpClient};
use crate::query::{MappingQuery, PricingQuery, SearchQuery};
use crate::{ClientError, ClientResult};

/// Every operation of the admin REST API
#[async_trait]
pub trait AdminApi: Send + Sync {
    // ========== Users ==========
    async fn list_users(&self, query: &SearchQuery) -> ClientResult<ListPage<User>>;
    async fn create_user(&self, data: &UserCreate) -> ClientResult<User>;
    async fn update_user(&self, id: i64, data: &UserUpdate) -> ClientResult<User>;
    async fn delete_user(&self, id: i64) -> ClientResult<()>;
    async fn reset_password(&self, id: i64, new_password: &str) -> ClientResult<()>;

    // ========== Sites ==========
    async fn list_sites(&self) -> ClientResult<Vec<Site>>;
    async fn site_tree(&self) -> ClientResult<Vec<Site>>;
    async fn create_site(&self, data: &SiteCreate) -> ClientResult<Site>;
    async fn update_site(&self, id: i64, data: &SiteUpdate) -> ClientResult<Site>;
    async fn reparent_site(&self, id: i64, parent_id: Option<i64>) -> ClientResult<Site>;
    async fn delete_site(&self, id: i64) -> ClientResult<()>;

    // ========== Suppliers ==========
    async fn list_suppliers(&self, query: &SearchQuery) -> ClientResult<ListPage<Supplier>>;
    async fn create_supplier(&self, data: &SupplierCreate) -> ClientResult<Supplier>;
    async fn update_supplier(&self, id: i64, data: &SupplierUpdate) -> ClientResult<Supplier>;
    async fn delete_supplier(&self, id: i64) -> ClientResult<()>;

    // ========== Supplier mappings ==========
    async fn list_mappings(&self, query: &MappingQuery) -> ClientResult<ListPage<SupplierMapping>>;
    async fn create_mapping(&self, data: &SupplierMappingCreate) -> ClientResult<SupplierMapping>;
    async fn update_mapping(
        &self,
        id: i64,
        data: &SupplierMappingUpdate,
    ) -> ClientResult<SupplierMapping>;
    async fn delete_mapping(&self, id: i64) -> ClientResult<()>;

    // ========== Meal pricing ==========
    async fn list_meal_pricing(&self, query: &PricingQuery) -> ClientResult<Vec<MealPricing>>;
    async fn create_meal_pricing(&self, data: &MealPricingCreate) -> ClientResult<MealPricing>;
    async fn update_meal_pricing(
        &self,
        id: i64,
        data: &MealPricingUpdate,
    ) -> ClientResult<MealPricing>;
    async fn delete_meal_pricing(&self, id: i64) -> ClientResult<()>;

    // ========== Ingredients ==========
    async fn upload_ingredients(&self, file: FileUpload) -> ClientResult<IngredientUploadResult>;

    // ========== Session ==========
    async fn logout(&self) -> ClientResult<()>;
}

/// Admin API client over an HTTP transport
#[derive(Debug, Clone)]
pub struct AdminClient<H> {
    http: H,
}

impl<H: HttpClient> AdminClient<H> {
    pub fn new(http: H) -> Self {
        Self { http }
    }

    /// Underlying transport
    pub fn http(&self) -> &H {
        &self.http
    }
}

/// Check the envelope and read the data key(s) into `T`
pub(crate) fn open<T: DeserializeOwned>(value: Value) -> ClientResult<T> {
    let envelope = Envelope::deserialize(&value)?;
    if !envelope.is_success() {
        let message = envelope
            .message
            .unwrap_or_else(|| "Request was rejected by the server".to_string());
        tracing::warn!(%message, "admin API rejected request");
        return Err(ClientError::Rejected(message));
    }
    serde_json::from_value(value)
        .map_err(|e| ClientError::InvalidResponse(format!("Unexpected payload: {}", e)))
}

/// Body of list endpoints: `{ <key>: [...], total_count?, total_pages? }`
#[derive(Deserialize)]
pub(crate) struct Counts {
    #[serde(default)]
    pub total_count: Option<u64>,
    #[serde(default)]
    pub total_pages: Option<u32>,
}

impl Counts {
    pub(crate) fn page<T>(self, items: Vec<T>) -> ListPage<T> {
        ListPage {
            items,
            total_count: self.total_count,
            total_pages: self.total_pages,
        }
    }
}

#[async_trait]
impl<H: HttpClient + 'static> AdminApi for AdminClient<H> {
    async fn list_users(&self, query: &SearchQuery) -> ClientResult<ListPage<User>> {
        users::list(&self.http, query).await
    }

    async fn create_user(&self, data: &UserCreate) -> ClientResult<User> {
        users::create(&self.http, data).await
    }

    async fn update_user(&self, id: i64, data: &UserUpdate) -> ClientResult<User> {
        users::update(&self.http, id, data).await
    }

    async fn delete_user(&self, id: i64) -> ClientResult<()> {
        users::delete(&self.http, id).await
    }

    async fn reset_password(&self, id: i64, new_password: &str) -> ClientResult<()> {
        users::reset_password(&self.http, id, new_password).await
    }

    async fn list_sites(&self) -> ClientResult<Vec<Site>> {
        sites::list(&self.http).await
    }

    async fn site_tree(&self) -> ClientResult<Vec<Site>> {
        sites::tree(&self.http).await
    }

    async fn create_site(&self, data: &SiteCreate) -> ClientResult<Site> {
        sites::create(&self.http, data).await
    }

    async fn update_site(&self, id: i64, data: &SiteUpdate) -> ClientResult<Site> {
        sites::update(&self.http, id, data).await
    }

    async fn reparent_site(&self, id: i64, parent_id: Option<i64>) -> ClientResult<Site> {
        sites::reparent(&self.http, id, parent_id).await
    }

    async fn delete_site(&self, id: i64) -> ClientResult<()> {
        sites::delete(&self.http, id).await
    }

    async fn list_suppliers(&self, query: &SearchQuery) -> ClientResult<ListPage<Supplier>> {
        suppliers::list(&self.http, query).await
    }

    async fn create_supplier(&self, data: &SupplierCreate) -> ClientResult<Supplier> {
        suppliers::create(&self.http, data).await
    }

    async fn update_supplier(&self, id: i64, data: &SupplierUpdate) -> ClientResult<Supplier> {
        suppliers::update(&self.http, id, data).await
    }

    async fn delete_supplier(&self, id: i64) -> ClientResult<()> {
        suppliers::delete(&self.http, id).await
    }

    async fn list_mappings(&self, query: &MappingQuery) -> ClientResult<ListPage<SupplierMapping>> {
        mappings::list(&self.http, query).await
    }

    async fn create_mapping(&self, data: &SupplierMappingCreate) -> ClientResult<SupplierMapping> {
        mappings::create(&self.http, data).await
    }

    async fn update_mapping(
        &self,
        id: i64,
        data: &SupplierMappingUpdate,
    ) -> ClientResult<SupplierMapping> {
        mappings::update(&self.http, id, data).await
    }

    async fn delete_mapping(&self, id: i64) -> ClientResult<()> {
        mappings::delete(&self.http, id).await
    }

    async fn list_meal_pricing(&self, query: &PricingQuery) -> ClientResult<Vec<MealPricing>> {
        meal_pricing::list(&self.http, query).await
    }

    async fn create_meal_pricing(&self, data: &MealPricingCreate) -> ClientResult<MealPricing> {
        meal_pricing::create(&self.http, data).await
    }

    async fn update_meal_pricing(
        &self,
        id: i64,
        data: &MealPricingUpdate,
    ) -> ClientResult<MealPricing> {
        meal_pricing::update(&self.http, id, data).await
    }

    async fn delete_meal_pricing(&self, id: i64) -> ClientResult<()> {
        meal_pricing::delete(&self.http, id).await
    }

    async fn upload_ingredients(&self, file: FileUpload) -> ClientResult<IngredientUploadResult> {
        ingredients::upload(&self.http, file).await
    }

    async fn logout(&self) -> ClientResult<()> {
        auth::logout(&self.http).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Users {
        users: Vec<Value>,
    }

    #[test]
    fn test_open_reads_data_key() {
        let body: Users = open(json!({"success": true, "users": [{"id": 1}]})).unwrap();
        assert_eq!(body.users.len(), 1);
    }

    #[test]
    fn test_open_accepts_missing_success() {
        let body: Users = open(json!({"users": []})).unwrap();
        assert!(body.users.is_empty());
    }

    #[test]
    fn test_open_rejects_failure_with_message() {
        let err = open::<Users>(json!({"success": false, "message": "권한이 없습니다"}))
            .unwrap_err();
        assert!(matches!(err, ClientError::Rejected(ref m) if m == "권한이 없습니다"));
    }

    #[test]
    fn test_open_reports_missing_key() {
        let err = open::<Users>(json!({"success": true})).unwrap_err();
        assert!(matches!(err, ClientError::InvalidResponse(_)));
    }
}
