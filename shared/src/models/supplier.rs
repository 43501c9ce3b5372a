//! Supplier Model

use serde::{Deserialize, Serialize};

/// Supplier entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Supplier {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub parent_code: Option<String>,
    #[serde(default)]
    pub business_number: Option<String>,
    #[serde(default)]
    pub representative: Option<String>,
    #[serde(default)]
    pub headquarters_address: Option<String>,
    #[serde(default)]
    pub headquarters_phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default = "super::default_true")]
    pub is_active: bool,
}

/// Create supplier payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SupplierCreate {
    pub name: String,
    pub parent_code: Option<String>,
    pub business_number: Option<String>,
    pub representative: Option<String>,
    pub headquarters_address: Option<String>,
    pub headquarters_phone: Option<String>,
    pub email: Option<String>,
    pub is_active: Option<bool>,
}

/// Update supplier payload
///
/// Nullable fields are `Option<Option<_>>`; `Some(None)` clears the value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SupplierUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "super::double_option"
    )]
    pub parent_code: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "super::double_option"
    )]
    pub business_number: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "super::double_option"
    )]
    pub representative: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "super::double_option"
    )]
    pub headquarters_address: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "super::double_option"
    )]
    pub headquarters_phone: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "super::double_option"
    )]
    pub email: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}
