// ==========================================
// 人事系统 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 行级问题（主数据未找到、重复等）不走错误通道，
//       收集在 ParsedRow.errors 中返回给调用方
// ==========================================

use crate::config::ConfigError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .xlsx/.xls/.csv）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    #[error("上传路径无效: {0}")]
    InvalidUploadPath(String),

    #[error("Template file not found")]
    TemplateNotFound,

    // ===== 业务规则错误 =====
    #[error("Tidak ada data valid untuk diimport")]
    NoValidRows,

    /// 落库事务失败（已整体回滚）
    #[error("Import gagal: {0}")]
    ImportFailed(String),

    // ===== 下层错误 =====
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

// 实现 From<calamine::Error>
impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_facing_messages() {
        assert_eq!(
            ImportError::NoValidRows.to_string(),
            "Tidak ada data valid untuk diimport"
        );
        assert_eq!(
            ImportError::ImportFailed("UNIQUE constraint failed".to_string()).to_string(),
            "Import gagal: UNIQUE constraint failed"
        );
    }
}
