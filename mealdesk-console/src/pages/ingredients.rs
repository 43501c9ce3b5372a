//! 식자재 업로드

use mealdesk_client::{AdminApi, ClientError, FileUpload};
use shared::models::IngredientUploadResult;
use std::path::Path;
use std::sync::Arc;

use super::report;
use crate::error::{ConsoleError, ConsoleResult};
use crate::notice::Notice;

pub struct IngredientsPage {
    api: Arc<dyn AdminApi>,
    /// Summary of the last upload
    pub last: Option<IngredientUploadResult>,
    pub notice: Option<Notice>,
}

impl IngredientsPage {
    pub fn new(api: Arc<dyn AdminApi>) -> Self {
        Self {
            api,
            last: None,
            notice: None,
        }
    }

    /// Send a spreadsheet and keep the ingestion summary
    pub async fn upload(&mut self, path: impl AsRef<Path>) -> ConsoleResult<&IngredientUploadResult> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(report(
                &mut self.notice,
                ConsoleError::validation("업로드할 파일을 선택하세요"),
            ));
        }
        let file = match FileUpload::from_path(path).await {
            Ok(file) => file,
            Err(err) => return Err(report(&mut self.notice, err.into())),
        };
        if file.bytes.is_empty() {
            let err = ClientError::Validation(format!("빈 파일입니다: {}", file.file_name));
            return Err(report(&mut self.notice, err.into()));
        }

        let result = match self.api.upload_ingredients(file).await {
            Ok(result) => result,
            Err(err) => return Err(report(&mut self.notice, err.into())),
        };
        tracing::info!(
            file = %result.file_name,
            total = result.total_rows,
            errors = result.error_count,
            "ingredients uploaded"
        );
        self.notice = Some(if result.has_errors() {
            Notice::error(format!(
                "{}건 중 {}건 처리, {}건 오류",
                result.total_rows, result.success_count, result.error_count
            ))
        } else {
            Notice::success(format!(
                "{}건 처리 (신규 {}, 수정 {})",
                result.success_count, result.new_count, result.updated_count
            ))
        });
        Ok(self.last.insert(result))
    }
}
