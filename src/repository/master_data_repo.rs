// ==========================================
// 人事系统 - 主数据仓储
// ==========================================
// 职责: 五类主数据表的写入与查询（导入前的基础数据准备）
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::master_data::{ReferenceItem, ReferenceKind};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

pub struct MasterDataRepository {
    conn: Arc<Mutex<Connection>>,
}

impl MasterDataRepository {
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 新增一条主数据（自动生成 UUID）
    pub fn insert(&self, kind: ReferenceKind, name: &str) -> RepositoryResult<ReferenceItem> {
        let item = ReferenceItem::new(Uuid::new_v4().to_string(), name.trim());
        let conn = self.get_conn()?;
        // 表名/列名来自 ReferenceKind 常量，非用户输入
        let sql = format!(
            "INSERT INTO {} (id, {}) VALUES (?1, ?2)",
            kind.table(),
            kind.name_column()
        );
        conn.execute(&sql, params![item.id, item.name])?;
        Ok(item)
    }

    /// 查询某一类主数据（按名称排序）
    pub fn list(&self, kind: ReferenceKind) -> RepositoryResult<Vec<ReferenceItem>> {
        let conn = self.get_conn()?;
        query_reference_items(&conn, kind)
    }
}

/// 读取主数据行（供导入仓储复用）
pub(crate) fn query_reference_items(
    conn: &Connection,
    kind: ReferenceKind,
) -> RepositoryResult<Vec<ReferenceItem>> {
    let sql = format!(
        "SELECT id, {} FROM {} ORDER BY {}",
        kind.name_column(),
        kind.table(),
        kind.name_column()
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], |row| {
        Ok(ReferenceItem {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    })?;
    let items = rows.collect::<Result<Vec<_>, _>>()?;
    Ok(items)
}
