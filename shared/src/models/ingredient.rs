//! Ingredient Upload Model
//!
//! The spreadsheet is parsed server-side; the console only displays the
//! outcome.

use serde::{Deserialize, Serialize};

/// Outcome of an ingredient spreadsheet upload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngredientUploadResult {
    pub file_name: String,
    #[serde(default)]
    pub total_rows: u32,
    #[serde(default)]
    pub success_count: u32,
    #[serde(default)]
    pub new_count: u32,
    #[serde(default)]
    pub updated_count: u32,
    #[serde(default)]
    pub error_count: u32,
    #[serde(default)]
    pub errors: Vec<RowError>,
}

impl IngredientUploadResult {
    pub fn has_errors(&self) -> bool {
        self.error_count > 0 || !self.errors.is_empty()
    }
}

/// Row-level validation error reported by the ingestion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowError {
    pub row: u32,
    #[serde(default)]
    pub column: Option<String>,
    #[serde(default)]
    pub field: Option<String>,
    pub error: String,
    #[serde(default)]
    pub value: Option<String>,
}
