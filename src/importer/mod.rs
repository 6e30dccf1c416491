// ==========================================
// 人事系统 - 导入层
// ==========================================
// 职责: 员工批量导入（Excel/CSV → 员工表）
// 流程: 解析 → 映射 → 主数据解析 → 冲突检测 → 字段校验 → 落库
// ==========================================

// 模块声明
pub mod conflict_handler;
pub mod data_cleaner;
pub mod dq_validator;
pub mod employee_importer_impl;
pub mod employee_importer_trait;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod messages;
pub mod reference_cache;
pub mod row_validator;
pub mod temp_files;

// 重导出核心类型
pub use conflict_handler::ConflictHandler as ConflictHandlerImpl;
pub use data_cleaner::DataCleaner;
pub use dq_validator::DqValidator as DqValidatorImpl;
pub use employee_importer_impl::EmployeeImporterImpl;
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper as FieldMapperImpl;
pub use file_parser::{CsvParser, ExcelParser, RawCell, RawRow, UniversalFileParser};
pub use messages::ImportMessages;
pub use reference_cache::ReferenceCache;
pub use row_validator::RowValidator;
pub use temp_files::{
    cleanup_stale_files, find_template, resolve_upload_path, store_upload, TempUpload,
};

// 重导出 Trait 接口
pub use employee_importer_trait::{
    ConflictHandler, DqValidator, EmployeeImporter, ExistingConflict, FieldMapper, FileParser,
};
