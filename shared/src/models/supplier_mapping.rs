//! Supplier Mapping Model
//!
//! Links a supplier to a site with two independent codes used for delivery
//! routing. The site is addressed as `customer_id`; `site_id` is accepted on
//! input for older payloads.

use serde::{Deserialize, Serialize};

/// Supplier × site mapping entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierMapping {
    pub id: i64,
    pub supplier_id: i64,
    /// Site id
    #[serde(alias = "site_id")]
    pub customer_id: i64,
    pub supplier_code: String,
    #[serde(default)]
    pub delivery_code: Option<String>,
    #[serde(default = "super::default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<String>,

    // -- Display names joined by the list endpoint --
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
}

/// Create mapping payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierMappingCreate {
    pub supplier_id: i64,
    #[serde(alias = "site_id")]
    pub customer_id: i64,
    pub supplier_code: String,
    pub delivery_code: Option<String>,
    pub is_active: Option<bool>,
}

/// Update mapping payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SupplierMappingUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<i64>,
    #[serde(alias = "site_id", skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_code: Option<String>,
    /// `Some(None)` clears the delivery code
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "super::double_option"
    )]
    pub delivery_code: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}
