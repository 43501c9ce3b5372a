//! Data models
//!
//! Entities and payloads of the admin REST API. All IDs are `i64`.
//! Each entity comes with `XxxCreate` / `XxxUpdate` payloads.

pub mod ingredient;
pub mod meal_pricing;
pub mod site;
pub mod supplier;
pub mod supplier_mapping;
pub mod user;

// Re-exports
pub use ingredient::*;
pub use meal_pricing::*;
pub use site::*;
pub use supplier::*;
pub use supplier_mapping::*;
pub use user::*;

pub(crate) fn default_true() -> bool {
    true
}

/// Serde glue for `Option<Option<T>>` update fields
///
/// A missing key reads as `None` (keep the stored value) and an explicit
/// `null` as `Some(None)` (clear it). Pair with `default` and
/// `skip_serializing_if = "Option::is_none"`.
pub(crate) mod double_option {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<T: Serialize, S: Serializer>(
        value: &Option<Option<T>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(inner) => inner.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, T: Deserialize<'de>, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Option<T>>, D::Error> {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}
