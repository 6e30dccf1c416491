// ==========================================
// 人事系统 - 配置管理器
// ==========================================
// 职责: 配置查询、覆写管理
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::config::import_config_trait::{ConfigError, ConfigResult, ImportConfigReader};
use crate::db::open_sqlite_connection;
use crate::domain::types::EnumCoercionPolicy;
use crate::i18n;
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    pub const ENUM_COERCION_POLICY: &str = "import.enum_coercion_policy";
    pub const TEMP_FILE_MAX_AGE_HOURS: &str = "import.temp_file_max_age_hours";
    pub const RETAIN_UPLOAD_ON_FAILURE: &str = "import.retain_upload_on_failure";
    pub const MESSAGE_LOCALE: &str = "import.message_locale";
}

const GLOBAL_SCOPE: &str = "global";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> ConfigResult<Self> {
        let conn = open_sqlite_connection(db_path).map_err(|e| ConfigError::ConfigReadError {
            key: "*".to_string(),
            message: e.to_string(),
        })?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_global_config_value(&self, key: &str) -> ConfigResult<Option<String>> {
        let read_error = |message: String| ConfigError::ConfigReadError {
            key: key.to_string(),
            message,
        };

        let conn = self.conn.lock().map_err(|e| read_error(format!("锁获取失败: {}", e)))?;
        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE scope_id = ?1 AND key = ?2",
                params![GLOBAL_SCOPE, key],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .map_err(|e| read_error(e.to_string()))?;
        Ok(value)
    }

    /// 写入 global scope 配置（存在则覆盖）
    pub fn set_global_config_value(&self, key: &str, value: &str) -> ConfigResult<()> {
        let write_error = |message: String| ConfigError::ConfigReadError {
            key: key.to_string(),
            message,
        };

        let conn = self.conn.lock().map_err(|e| write_error(format!("锁获取失败: {}", e)))?;
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value, updated_at)
             VALUES (?1, ?2, ?3, datetime('now'))
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?3, updated_at = datetime('now')",
            params![GLOBAL_SCOPE, key, value],
        )
        .map_err(|e| write_error(e.to_string()))?;
        Ok(())
    }

    /// 读取配置值（缺失时返回 None，值已 TRIM）
    fn get_trimmed(&self, key: &str) -> ConfigResult<Option<String>> {
        Ok(self
            .get_global_config_value(key)?
            .map(|v| v.trim().to_string()))
    }
}

fn value_error(key: &str, value: &str, message: &str) -> ConfigError {
    ConfigError::ConfigValueError {
        key: key.to_string(),
        value: value.to_string(),
        message: message.to_string(),
    }
}

// ==========================================
// ImportConfigReader 实现
// ==========================================
#[async_trait]
impl ImportConfigReader for ConfigManager {
    async fn get_enum_coercion_policy(&self) -> ConfigResult<EnumCoercionPolicy> {
        let key = config_keys::ENUM_COERCION_POLICY;
        match self.get_trimmed(key)? {
            None => Ok(EnumCoercionPolicy::default()),
            Some(value) => EnumCoercionPolicy::from_token(&value)
                .ok_or_else(|| value_error(key, &value, "期望 LENIENT 或 STRICT")),
        }
    }

    async fn get_temp_file_max_age_hours(&self) -> ConfigResult<u64> {
        let key = config_keys::TEMP_FILE_MAX_AGE_HOURS;
        match self.get_trimmed(key)? {
            None => Ok(24),
            Some(value) => value
                .parse::<u64>()
                .map_err(|e| value_error(key, &value, &e.to_string())),
        }
    }

    async fn get_retain_upload_on_failure(&self) -> ConfigResult<bool> {
        let key = config_keys::RETAIN_UPLOAD_ON_FAILURE;
        match self.get_trimmed(key)? {
            None => Ok(false),
            Some(value) => match value.to_lowercase().as_str() {
                "true" | "1" => Ok(true),
                "false" | "0" => Ok(false),
                _ => Err(value_error(key, &value, "期望 true 或 false")),
            },
        }
    }

    async fn get_message_locale(&self) -> ConfigResult<String> {
        let key = config_keys::MESSAGE_LOCALE;
        match self.get_trimmed(key)? {
            None => Ok(i18n::DEFAULT_LOCALE.to_string()),
            Some(value) if i18n::is_supported_locale(&value) => Ok(value),
            Some(value) => Err(value_error(key, &value, "不支持的语言")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::import_config_trait::ImportSettings;
    use crate::db::open_in_memory;

    fn manager() -> ConfigManager {
        ConfigManager::from_connection(Arc::new(Mutex::new(open_in_memory().unwrap())))
    }

    #[tokio::test]
    async fn test_defaults_when_missing() {
        let config = manager();
        let settings = config.load_import_settings().await.unwrap();
        assert_eq!(settings, ImportSettings::default());
    }

    #[tokio::test]
    async fn test_overrides() {
        let config = manager();
        config
            .set_global_config_value(config_keys::ENUM_COERCION_POLICY, "strict")
            .unwrap();
        config
            .set_global_config_value(config_keys::TEMP_FILE_MAX_AGE_HOURS, " 6 ")
            .unwrap();
        config
            .set_global_config_value(config_keys::RETAIN_UPLOAD_ON_FAILURE, "TRUE")
            .unwrap();
        config
            .set_global_config_value(config_keys::MESSAGE_LOCALE, "en")
            .unwrap();

        let settings = config.load_import_settings().await.unwrap();
        assert_eq!(settings.enum_coercion_policy, EnumCoercionPolicy::Strict);
        assert_eq!(settings.temp_file_max_age_hours, 6);
        assert!(settings.retain_upload_on_failure);
        assert_eq!(settings.message_locale, "en");
    }

    #[tokio::test]
    async fn test_malformed_value() {
        let config = manager();
        config
            .set_global_config_value(config_keys::TEMP_FILE_MAX_AGE_HOURS, "abc")
            .unwrap();

        let err = config.get_temp_file_max_age_hours().await.unwrap_err();
        assert!(matches!(err, ConfigError::ConfigValueError { .. }));
    }

    #[test]
    fn test_set_overwrites() {
        let config = manager();
        config.set_global_config_value("k", "1").unwrap();
        config.set_global_config_value("k", "2").unwrap();
        assert_eq!(config.get_global_config_value("k").unwrap(), Some("2".to_string()));
    }
}
