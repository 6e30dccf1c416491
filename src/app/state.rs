// ==========================================
// 人事系统 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// ==========================================

use std::sync::{Arc, Mutex};
use rusqlite::Connection;

use crate::api::ImportApi;
use crate::config::AppSettings;
use crate::db::{ensure_schema, open_sqlite_connection, read_schema_version};

/// 应用状态
///
/// 包含所有API实例和共享资源，作为 axum 路由状态（Clone 只复制 Arc）
#[derive(Clone)]
pub struct AppState {
    /// 员工导入API
    pub import_api: Arc<ImportApi>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 参数
    /// - settings: 进程级配置
    ///
    /// # 返回
    /// - Ok(AppState): 应用状态实例
    /// - Err(String): 初始化错误
    ///
    /// # 说明
    /// 该方法会：
    /// 1. 打开数据库并幂等建表
    /// 2. 创建导入目录
    /// 3. 创建所有API实例（共享同一连接）
    pub fn new(settings: &AppSettings) -> Result<Self, String> {
        tracing::info!("初始化AppState，数据库路径: {}", settings.db_path);

        let conn = open_sqlite_connection(&settings.db_path)
            .map_err(|e| format!("无法打开数据库: {}", e))?;
        ensure_schema(&conn).map_err(|e| format!("数据库建表失败: {}", e))?;
        let version = read_schema_version(&conn).map_err(|e| format!("读取 schema 版本失败: {}", e))?;
        tracing::info!(schema_version = ?version, "数据库 schema 就绪");

        std::fs::create_dir_all(settings.import_dir())
            .map_err(|e| format!("无法创建导入目录: {}", e))?;

        Ok(Self::from_connection(
            Arc::new(Mutex::new(conn)),
            settings,
        ))
    }

    /// 基于已打开（已建表）的连接创建
    pub fn from_connection(conn: Arc<Mutex<Connection>>, settings: &AppSettings) -> Self {
        let import_api = Arc::new(ImportApi::new(
            conn,
            settings.import_dir(),
            settings.template_paths.clone(),
        ));

        tracing::info!("AppState初始化完成");

        Self { import_api }
    }
}
