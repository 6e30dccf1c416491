// ==========================================
// 人事系统 - 员工导入API
// ==========================================
// 职责: 封装员工导入相关功能（模板 / 上传预览 / 确认导入 / 批次历史）
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::ConfigManager;
use crate::domain::employee::{ImportBatch, ImportExecutionResult, ParsedRow};
use crate::importer::{
    find_template, resolve_upload_path, store_upload, EmployeeImporter, EmployeeImporterImpl,
    FieldMapperImpl, RowValidator, UniversalFileParser,
};
use crate::repository::EmployeeImportRepositoryImpl;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

/// 批次历史默认条数
pub const DEFAULT_BATCH_LIMIT: usize = 20;
/// 批次历史最大条数
pub const MAX_BATCH_LIMIT: usize = 100;

/// 单行错误（预览用）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowErrors {
    pub row: usize,
    pub errors: Vec<String>,
}

/// 上传预览响应
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportPreviewResponse {
    pub total_rows: usize,
    pub valid_rows: usize,
    pub invalid_rows: usize,
    /// 全部行（含错误行）
    pub preview: Vec<ParsedRow>,
    /// 仅含有错误的行
    pub errors: Vec<RowErrors>,
    /// 确认导入时回传的路径
    pub temp_file_path: String,
}

type DefaultImporter = EmployeeImporterImpl<EmployeeImportRepositoryImpl, ConfigManager>;

/// 员工导入API
pub struct ImportApi {
    importer: DefaultImporter,
    template_paths: Vec<PathBuf>,
}

impl ImportApi {
    /// 创建新的ImportApi实例
    ///
    /// # 参数
    /// - conn: 共享数据库连接
    /// - import_dir: 上传文件目录
    /// - template_paths: 模板候选路径（按顺序查找）
    pub fn new(
        conn: Arc<Mutex<Connection>>,
        import_dir: PathBuf,
        template_paths: Vec<PathBuf>,
    ) -> Self {
        let importer = EmployeeImporterImpl::new(
            EmployeeImportRepositoryImpl::from_connection(conn.clone()),
            ConfigManager::from_connection(conn),
            Box::new(UniversalFileParser),
            Box::new(FieldMapperImpl::new()),
            RowValidator::default(),
            import_dir,
        );
        Self {
            importer,
            template_paths,
        }
    }

    /// 模板文件路径
    pub fn template_path(&self) -> ApiResult<PathBuf> {
        Ok(find_template(&self.template_paths)?)
    }

    /// 保存上传文件并返回校验预览
    ///
    /// 解析失败时删除已保存的文件
    pub async fn upload_and_preview(
        &self,
        original_name: &str,
        bytes: &[u8],
    ) -> ApiResult<ImportPreviewResponse> {
        let stored = store_upload(self.importer.import_dir(), original_name, bytes)?;

        let validation = match self.importer.validate_file(&stored).await {
            Ok(v) => v,
            Err(e) => {
                if let Err(rm_err) = fs::remove_file(&stored) {
                    warn!(path = %stored.display(), error = %rm_err, "上传文件删除失败");
                }
                return Err(e.into());
            }
        };

        let errors = validation
            .results
            .iter()
            .filter(|r| !r.is_valid())
            .map(|r| RowErrors {
                row: r.row_number,
                errors: r.errors.clone(),
            })
            .collect();

        info!(
            file = %original_name,
            total = validation.summary.total_rows,
            invalid = validation.summary.invalid_rows,
            "上传预览完成"
        );

        Ok(ImportPreviewResponse {
            total_rows: validation.summary.total_rows,
            valid_rows: validation.summary.valid_rows,
            invalid_rows: validation.summary.invalid_rows,
            preview: validation.results,
            errors,
            temp_file_path: stored.display().to_string(),
        })
    }

    /// 确认导入（重新解析 + 重新校验 + 单事务落库）
    pub async fn confirm_import(&self, file_path: &str) -> ApiResult<ImportExecutionResult> {
        if file_path.trim().is_empty() {
            return Err(ApiError::InvalidInput("File path is required".to_string()));
        }

        let path = resolve_upload_path(self.importer.import_dir(), file_path)?;
        if !path.is_file() {
            return Err(ApiError::NotFound(format!("文件不存在: {}", file_path)));
        }

        Ok(self.importer.execute_import(&path).await?)
    }

    /// 最近导入批次（limit 限制在 1-100 之间）
    pub async fn list_recent_batches(&self, limit: Option<usize>) -> ApiResult<Vec<ImportBatch>> {
        let limit = limit.unwrap_or(DEFAULT_BATCH_LIMIT).clamp(1, MAX_BATCH_LIMIT);
        Ok(self.importer.list_recent_batches(limit).await?)
    }
}
