//! Ingredient sheet upload
//!
//! The mock reads CSV sheets laid out as `name,unit,price` with a header
//! row. Excel files are accepted and stored without row parsing.

use axum::{
    Json,
    extract::{Multipart, State},
};
use rust_decimal::Decimal;
use serde_json::Value;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{IngredientUploadResult, RowError};
use std::collections::HashSet;
use std::path::Path;
use std::str::FromStr;

use crate::state::SharedBackend;

const SUPPORTED_FORMATS: &[&str] = &["xlsx", "xls", "csv"];

/// Parse a CSV sheet; rows are numbered like the spreadsheet (header = 1)
fn read_csv(
    file_name: &str,
    text: &str,
    known: &mut HashSet<String>,
) -> IngredientUploadResult {
    let mut result = IngredientUploadResult {
        file_name: file_name.to_string(),
        ..IngredientUploadResult::default()
    };

    for (index, line) in text.lines().enumerate().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        let row = index as u32 + 1;
        result.total_rows += 1;

        let cells: Vec<&str> = line.split(',').map(str::trim).collect();
        let name = cells.first().copied().unwrap_or_default();
        if name.is_empty() {
            result.errors.push(RowError {
                row,
                column: Some("A".to_string()),
                field: Some("name".to_string()),
                error: "Ingredient name is required".to_string(),
                value: None,
            });
            continue;
        }
        if let Some(price) = cells.get(2).filter(|p| !p.is_empty()) {
            if Decimal::from_str(price).is_err() {
                result.errors.push(RowError {
                    row,
                    column: Some("C".to_string()),
                    field: Some("price".to_string()),
                    error: "Price is not a number".to_string(),
                    value: Some(price.to_string()),
                });
                continue;
            }
        }

        result.success_count += 1;
        if known.insert(name.to_string()) {
            result.new_count += 1;
        } else {
            result.updated_count += 1;
        }
    }

    result.error_count = result.errors.len() as u32;
    result
}

/// POST /api/admin/upload-ingredients (multipart `file`)
pub async fn upload(
    State(backend): State<SharedBackend>,
    mut multipart: Multipart,
) -> AppResult<Json<Value>> {
    let mut upload: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Invalid multipart request: {}", e)))?
    {
        if field.name() == Some("file") {
            let file_name = field.file_name().unwrap_or("upload").to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::validation(format!("Multipart error: {}", e)))?;
            upload = Some((file_name, bytes.to_vec()));
            break;
        }
    }

    let (file_name, bytes) = upload.ok_or_else(|| AppError::new(ErrorCode::NoFileProvided))?;
    if bytes.is_empty() {
        return Err(AppError::new(ErrorCode::EmptyFile));
    }
    let ext = Path::new(&file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    if !SUPPORTED_FORMATS.contains(&ext.as_str()) {
        return Err(AppError::coded(
            ErrorCode::UnsupportedFileFormat,
            format!(
                "Unsupported file format '{}'. Supported: {}",
                ext,
                SUPPORTED_FORMATS.join(", ")
            ),
        ));
    }

    let result = if ext == "csv" {
        let text = String::from_utf8_lossy(&bytes);
        let mut store = backend.write().await;
        read_csv(&file_name, &text, &mut store.ingredients)
    } else {
        IngredientUploadResult {
            file_name: file_name.clone(),
            ..IngredientUploadResult::default()
        }
    };

    tracing::info!(
        file = %file_name,
        rows = result.total_rows,
        errors = result.error_count,
        "ingredient sheet uploaded"
    );

    let mut body = serde_json::to_value(&result)
        .map_err(|e| AppError::internal(format!("Failed to encode result: {}", e)))?;
    if let Value::Object(map) = &mut body {
        map.insert("success".to_string(), Value::Bool(true));
    }
    Ok(Json(body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_csv_counts_rows() {
        let mut known = HashSet::from(["양파".to_string()]);
        let sheet = "name,unit,price\n양파,kg,1200\n감자,kg,900\n,kg,100\n당근,kg,비쌈\n\n";
        let result = read_csv("식자재.csv", sheet, &mut known);

        assert_eq!(result.total_rows, 4);
        assert_eq!(result.success_count, 2);
        assert_eq!(result.new_count, 1);
        assert_eq!(result.updated_count, 1);
        assert_eq!(result.error_count, 2);
        assert_eq!(result.errors[0].row, 4);
        assert_eq!(result.errors[1].field.as_deref(), Some("price"));
        assert_eq!(result.errors[1].value.as_deref(), Some("비쌈"));
        assert!(known.contains("감자"));
    }
}
