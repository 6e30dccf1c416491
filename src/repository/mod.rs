// ==========================================
// 人事系统 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 职责: 提供数据访问接口,屏蔽数据库细节
// 约束: 所有值使用参数化查询,防止 SQL 注入
// ==========================================

pub mod employee_import_repo;
pub mod employee_import_repo_impl;
pub mod employee_repo;
pub mod error;
pub mod master_data_repo;

// 重导出核心仓储
pub use employee_import_repo::EmployeeImportRepository;
pub use employee_import_repo_impl::EmployeeImportRepositoryImpl;
pub use employee_repo::EmployeeRepository;
pub use error::{RepositoryError, RepositoryResult};
pub use master_data_repo::MasterDataRepository;
