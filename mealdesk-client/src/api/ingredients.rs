//! Ingredient upload endpoint

use serde_json::Value;
use shared::models::IngredientUploadResult;

use super::open;
use crate::ClientResult;
use crate::http::{FileUpload, HttpClient};

/// POST /api/admin/upload-ingredients (multipart `file`)
///
/// The summary fields sit next to `success` in the envelope.
pub(super) async fn upload<H: HttpClient>(
    http: &H,
    file: FileUpload,
) -> ClientResult<IngredientUploadResult> {
    tracing::info!(file = %file.file_name, bytes = file.bytes.len(), "uploading ingredient sheet");
    let value: Value = http.upload("/api/admin/upload-ingredients", file).await?;
    open(value)
}
