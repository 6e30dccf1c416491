// ==========================================
// 人事系统 - 员工导入 Trait
// ==========================================
// 职责: 定义员工导入接口（不包含实现）
// ==========================================

use crate::domain::employee::{
    ImportBatch, ImportExecutionResult, ImportValidationResult, ParsedEmployeeData, ParsedRow,
};
use crate::domain::types::EnumCoercionPolicy;
use crate::importer::error::ImportResult;
use crate::importer::file_parser::RawRow;
use crate::importer::messages::ImportMessages;
use crate::importer::reference_cache::ReferenceCache;
use async_trait::async_trait;
use std::path::Path;

// ==========================================
// EmployeeImporter Trait
// ==========================================
// 用途: 员工导入主接口
// 实现者: EmployeeImporterImpl
#[async_trait]
pub trait EmployeeImporter: Send + Sync {
    /// 解析并校验上传文件（预览，不落库）
    ///
    /// # 返回
    /// - Ok(ImportValidationResult): 每一行及其错误列表 + 汇总
    /// - Err: 文件不存在 / 格式不支持 / 解析失败 / 读取主数据失败
    async fn validate_file(&self, file_path: &Path) -> ImportResult<ImportValidationResult>;

    /// 确认导入
    ///
    /// # 流程
    /// 1. 重新解析 + 重新校验（不信任预览结果）
    /// 2. 无有效行 → NoValidRows（不开启事务）
    /// 3. 单事务顺序插入所有有效行 + 批次记录
    /// 4. 成功后清理过期临时文件及本次上传文件
    async fn execute_import(&self, file_path: &Path) -> ImportResult<ImportExecutionResult>;

    /// 最近的导入批次
    async fn list_recent_batches(&self, limit: usize) -> ImportResult<Vec<ImportBatch>>;
}

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口（阶段 0）
// 实现者: ExcelParser, CsvParser, UniversalFileParser
pub trait FileParser: Send + Sync {
    /// 解析文件为原始行记录（跳过完全空白行，保留物理行号）
    fn parse_to_raw_rows(&self, file_path: &Path) -> ImportResult<Vec<RawRow>>;
}

// ==========================================
// FieldMapper Trait
// ==========================================
// 用途: 字段映射接口（阶段 1）
// 实现者: FieldMapper
pub trait FieldMapper: Send + Sync {
    /// 将原始行映射为 ParsedRow（必填缺失/枚举无效写入 errors，不中断）
    fn map_to_parsed_row(
        &self,
        row: &RawRow,
        policy: EnumCoercionPolicy,
        messages: &ImportMessages,
    ) -> ParsedRow;
}

// ==========================================
// DqValidator Trait
// ==========================================
// 用途: 字段格式校验接口
// 实现者: DqValidator
pub trait DqValidator: Send + Sync {
    /// 校验字段规则，返回 "<字段路径>: <消息>" 列表
    fn validate_schema(&self, data: &ParsedEmployeeData, messages: &ImportMessages) -> Vec<String>;
}

/// 与库内已有员工的冲突
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExistingConflict {
    Nik(String),
    Email(String),
}

// ==========================================
// ConflictHandler Trait
// ==========================================
// 用途: 冲突处理接口
// 实现者: ConflictHandler
pub trait ConflictHandler: Send + Sync {
    /// 检测文件内重复 NIK（首次出现不计）
    fn detect_duplicates(&self, rows: &[ParsedRow]) -> Vec<(usize, String)>;

    /// 检测与库内已有员工的冲突
    fn detect_existing(
        &self,
        data: &ParsedEmployeeData,
        cache: &ReferenceCache,
    ) -> Vec<ExistingConflict>;
}
