// ==========================================
// 员工导入相关路由
// ==========================================
// 基础路径: /api/hr/import
// ==========================================

use super::common::{ok, HttpError, HttpResult};
use crate::api::error::ApiError;
use crate::app::state::AppState;
use axum::extract::{Multipart, Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

/// 模板下载文件名
pub const TEMPLATE_DOWNLOAD_NAME: &str = "Employee_Import_Template.xlsx";
const XLSX_CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// multipart 中的文件字段名
const UPLOAD_FIELD: &str = "file";

pub(super) fn routes() -> Router<AppState> {
    Router::new()
        .route("/template", get(download_template))
        .route("/upload", post(upload_and_preview))
        .route("/confirm", post(confirm_import))
        .route("/batches", get(list_batches))
}

/// GET /template
async fn download_template(State(state): State<AppState>) -> HttpResult {
    let path = state.import_api.template_path()?;
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| ApiError::NotFound(format!("模板读取失败: {}", e)))?;

    let disposition = format!("attachment; filename=\"{}\"", TEMPLATE_DOWNLOAD_NAME);
    Ok((
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}

/// POST /upload（multipart 字段 file）
async fn upload_and_preview(State(state): State<AppState>, mut multipart: Multipart) -> HttpResult {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidInput(e.body_text()))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::InvalidInput(e.body_text()))?;
        upload = Some((file_name, bytes.to_vec()));
    }

    let (file_name, bytes) =
        upload.ok_or_else(|| ApiError::InvalidInput("No file uploaded".to_string()))?;

    let preview = state
        .import_api
        .upload_and_preview(&file_name, &bytes)
        .await
        .map_err(HttpError::with_context("Error processing file"))?;

    Ok(ok(preview, Some("File processed successfully")))
}

#[derive(Debug, Deserialize)]
struct ConfirmRequest {
    #[serde(rename = "filePath")]
    file_path: Option<String>,
}

/// POST /confirm（JSON { filePath }）
async fn confirm_import(
    State(state): State<AppState>,
    Json(request): Json<ConfirmRequest>,
) -> HttpResult {
    let file_path = request.file_path.unwrap_or_default();

    let result = state
        .import_api
        .confirm_import(&file_path)
        .await
        .map_err(HttpError::with_context("Error executing import"))?;

    Ok(ok(result, Some("Import successful")))
}

#[derive(Debug, Deserialize)]
struct BatchQuery {
    limit: Option<usize>,
}

/// GET /batches?limit=N
async fn list_batches(State(state): State<AppState>, Query(query): Query<BatchQuery>) -> HttpResult {
    let batches = state.import_api.list_recent_batches(query.limit).await?;
    Ok(ok(batches, None))
}
