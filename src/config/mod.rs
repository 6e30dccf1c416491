// ==========================================
// 人事系统 - 配置层
// ==========================================
// 职责: 进程级配置（环境变量）+ 运行期导入配置
// 存储: config_kv 表
// ==========================================

pub mod app_settings;
pub mod config_manager;
pub mod import_config_trait;

// 重导出核心配置管理器
pub use app_settings::{get_default_db_path, AppSettings};
pub use config_manager::{config_keys, ConfigManager};
pub use import_config_trait::{ConfigError, ConfigResult, ImportConfigReader, ImportSettings};
