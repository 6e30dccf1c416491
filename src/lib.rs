// ==========================================
// 人事系统 - 员工批量导入核心库
// ==========================================
// 技术栈: axum + Rust + SQLite
// 流程: 上传 → 解析 → 校验 → 预览 → 确认 → 单事务落库
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "id");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一/建表）
pub mod db;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// 应用层 - HTTP 集成
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{Agama, EnumCoercionPolicy, GolonganDarah, JenisKelamin, StatusPernikahan};

// 领域实体
pub use domain::{
    Employee, ImportBatch, ImportExecutionResult, ImportValidationResult, ParsedEmployeeData,
    ParsedRow, ReferenceItem, ReferenceKind,
};

// API
pub use api::{ApiError, ImportApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "人事系统 - 员工批量导入";
