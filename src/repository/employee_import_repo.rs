// ==========================================
// 人事系统 - 员工导入 Repository Trait
// ==========================================
// 职责: 定义导入相关数据访问接口（不包含业务逻辑）
// 红线: Repository 不含业务规则，只做数据 CRUD
// ==========================================

use crate::domain::employee::{Employee, EmployeeIdentity, ImportBatch, NewEmployee};
use crate::domain::master_data::{ReferenceItem, ReferenceKind};
use crate::repository::error::RepositoryResult;
use async_trait::async_trait;

// ==========================================
// EmployeeImportRepository Trait
// ==========================================
// 用途: 员工导入相关数据访问
// 实现者: EmployeeImportRepositoryImpl（使用 rusqlite）
#[async_trait]
pub trait EmployeeImportRepository: Send + Sync {
    // ===== 校验阶段读取 =====

    /// 读取某一类主数据的全部行
    async fn list_reference_items(&self, kind: ReferenceKind) -> RepositoryResult<Vec<ReferenceItem>>;

    /// 读取所有已存在员工的 NIK / 公司邮箱
    async fn list_employee_identities(&self) -> RepositoryResult<Vec<EmployeeIdentity>>;

    // ===== 落库（事务化）=====

    /// 在同一事务中按顺序插入员工并写入批次记录
    ///
    /// # 返回
    /// - Ok(Vec<Employee>): 已插入的员工（按输入顺序）
    /// - Err: 任一插入失败，整个事务回滚（无员工、无批次记录）
    async fn insert_employees_with_batch(
        &self,
        employees: Vec<NewEmployee>,
        batch: ImportBatch,
    ) -> RepositoryResult<Vec<Employee>>;

    // ===== 批次查询 =====

    /// 最近的导入批次（按导入时间倒序）
    async fn get_recent_batches(&self, limit: usize) -> RepositoryResult<Vec<ImportBatch>>;
}
