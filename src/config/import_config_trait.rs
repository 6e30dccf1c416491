// ==========================================
// 人事系统 - 导入配置读取 Trait
// ==========================================
// 职责: 定义导入模块所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::domain::types::EnumCoercionPolicy;
use crate::i18n::DEFAULT_LOCALE;
use async_trait::async_trait;
use thiserror::Error;

/// 配置读取错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置读取失败 (key: {key}): {message}")]
    ConfigReadError { key: String, message: String },

    #[error("配置值格式错误 (key: {key}, value: {value}): {message}")]
    ConfigValueError {
        key: String,
        value: String,
        message: String,
    },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// ==========================================
// ImportSettings - 一次导入调用使用的配置快照
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSettings {
    pub enum_coercion_policy: EnumCoercionPolicy,
    pub temp_file_max_age_hours: u64,
    pub retain_upload_on_failure: bool,
    pub message_locale: String,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            enum_coercion_policy: EnumCoercionPolicy::Lenient,
            temp_file_max_age_hours: 24,
            retain_upload_on_failure: false,
            message_locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

// ==========================================
// ImportConfigReader Trait
// ==========================================
// 用途: 导入模块所需的配置读取接口
// 实现者: ConfigManager（从 config_kv 表读取）
#[async_trait]
pub trait ImportConfigReader: Send + Sync {
    /// 枚举强制转换策略
    ///
    /// # 默认值
    /// - LENIENT
    async fn get_enum_coercion_policy(&self) -> ConfigResult<EnumCoercionPolicy>;

    /// 临时上传文件最长保留时间（小时）
    ///
    /// # 默认值
    /// - 24
    async fn get_temp_file_max_age_hours(&self) -> ConfigResult<u64>;

    /// 导入事务失败时是否保留上传文件（便于重试确认）
    ///
    /// # 默认值
    /// - false
    async fn get_retain_upload_on_failure(&self) -> ConfigResult<bool>;

    /// 行错误消息语言
    ///
    /// # 默认值
    /// - id
    async fn get_message_locale(&self) -> ConfigResult<String>;

    /// 一次性读取全部导入配置
    async fn load_import_settings(&self) -> ConfigResult<ImportSettings> {
        Ok(ImportSettings {
            enum_coercion_policy: self.get_enum_coercion_policy().await?,
            temp_file_max_age_hours: self.get_temp_file_max_age_hours().await?,
            retain_upload_on_failure: self.get_retain_upload_on_failure().await?,
            message_locale: self.get_message_locale().await?,
        })
    }
}
