// ==========================================
// 人事系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含数据访问逻辑,不含导入管道逻辑
// ==========================================

pub mod employee;
pub mod master_data;
pub mod types;

// 重导出核心类型
pub use employee::{
    Employee, EmployeeIdentity, ImportBatch, ImportExecutionResult, ImportValidationResult,
    ImportValidationSummary, NewEmployee, ParsedEmployeeData, ParsedRow,
};
pub use master_data::{ReferenceItem, ReferenceKind};
pub use types::{Agama, EnumCoercionPolicy, GolonganDarah, JenisKelamin, StatusPernikahan};
