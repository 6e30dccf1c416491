// ==========================================
// 人事系统 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，转换导入层/仓储层错误为用户可读的错误消息
// ==========================================

use crate::importer::ImportError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("业务规则违反: {0}")]
    BusinessRuleViolation(String),

    // ==========================================
    // 数据访问错误
    // ==========================================
    #[error("数据库错误: {0}")]
    DatabaseError(String),

    // ==========================================
    // 导入错误
    // ==========================================
    #[error("文件导入失败: {0}")]
    ImportError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),
}

impl ApiError {
    /// 错误代码（返回给前端）
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidInput(_) => "INVALID_INPUT",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::BusinessRuleViolation(_) => "BUSINESS_RULE_VIOLATION",
            ApiError::DatabaseError(_) => "DATABASE_ERROR",
            ApiError::ImportError(_) => "IMPORT_ERROR",
            ApiError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// 不带分类前缀的原始消息
    pub fn message(&self) -> String {
        match self {
            ApiError::InvalidInput(msg)
            | ApiError::NotFound(msg)
            | ApiError::BusinessRuleViolation(msg)
            | ApiError::DatabaseError(msg)
            | ApiError::ImportError(msg)
            | ApiError::InternalError(msg) => msg.clone(),
        }
    }
}

// ==========================================
// 从 RepositoryError 转换
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})不存在", entity, id))
            }
            RepositoryError::DatabaseQueryError(msg) => ApiError::DatabaseError(msg),
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseError(format!("数据库锁获取失败: {}", msg))
            }
            RepositoryError::UniqueConstraintViolation(msg) => {
                ApiError::BusinessRuleViolation(format!("唯一约束违反: {}", msg))
            }
            RepositoryError::ForeignKeyViolation(msg) => {
                ApiError::BusinessRuleViolation(format!("外键约束违反: {}", msg))
            }
            RepositoryError::NotNullViolation(msg) => {
                ApiError::BusinessRuleViolation(format!("非空约束违反: {}", msg))
            }
        }
    }
}

// ==========================================
// 从 ImportError 转换
// ==========================================
// 输入形状问题 → 400；文件缺失 → 404；解析/落库失败 → 500
impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::UnsupportedFormat(_) | ImportError::InvalidUploadPath(_) => {
                ApiError::InvalidInput(err.to_string())
            }
            ImportError::FileNotFound(_) | ImportError::TemplateNotFound => {
                ApiError::NotFound(err.to_string())
            }
            ImportError::NoValidRows => ApiError::BusinessRuleViolation(err.to_string()),
            ImportError::FileReadError(_)
            | ImportError::ExcelParseError(_)
            | ImportError::CsvParseError(_)
            | ImportError::ImportFailed(_) => ApiError::ImportError(err.to_string()),
            ImportError::Config(e) => ApiError::InternalError(e.to_string()),
            ImportError::Repository(e) => ApiError::from(e),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_conversion() {
        let repo_err = RepositoryError::NotFound {
            entity: "Employee".to_string(),
            id: "E001".to_string(),
        };
        let api_err: ApiError = repo_err.into();
        match api_err {
            ApiError::NotFound(msg) => {
                assert!(msg.contains("Employee"));
                assert!(msg.contains("E001"));
            }
            _ => panic!("Expected NotFound"),
        }

        let api_err: ApiError = RepositoryError::LockError("poisoned".to_string()).into();
        assert_eq!(api_err.code(), "DATABASE_ERROR");
    }

    #[test]
    fn test_import_error_conversion() {
        let api_err: ApiError = ImportError::NoValidRows.into();
        assert_eq!(api_err.code(), "BUSINESS_RULE_VIOLATION");
        assert_eq!(api_err.message(), "Tidak ada data valid untuk diimport");

        let api_err: ApiError = ImportError::ImportFailed("UNIQUE constraint failed".to_string()).into();
        assert_eq!(api_err.code(), "IMPORT_ERROR");
        assert_eq!(api_err.message(), "Import gagal: UNIQUE constraint failed");

        let api_err: ApiError = ImportError::TemplateNotFound.into();
        assert!(matches!(api_err, ApiError::NotFound(_)));
        assert_eq!(api_err.message(), "Template file not found");

        let api_err: ApiError = ImportError::InvalidUploadPath("../x".to_string()).into();
        assert_eq!(api_err.code(), "INVALID_INPUT");

        let api_err: ApiError = ImportError::Repository(RepositoryError::DatabaseQueryError(
            "no such table".to_string(),
        ))
        .into();
        assert_eq!(api_err.code(), "DATABASE_ERROR");
    }
}
