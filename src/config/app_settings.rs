// ==========================================
// 人事系统 - 进程级配置（环境变量）
// ==========================================
// 职责: 数据库路径 / 上传目录 / 监听地址 / 模板候选路径
// 运行期可调的导入参数在 config_kv 表中，见 ConfigManager
// ==========================================

use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "HRIS_DB_PATH";
pub const ENV_UPLOAD_DIR: &str = "HRIS_UPLOAD_DIR";
pub const ENV_BIND_ADDR: &str = "HRIS_BIND_ADDR";
pub const ENV_TEMPLATE_PATHS: &str = "HRIS_TEMPLATE_PATHS";
pub const ENV_MAX_UPLOAD_BYTES: &str = "HRIS_MAX_UPLOAD_BYTES";

/// 导入上传文件子目录
pub const EXCEL_IMPORT_SUBDIR: &str = "excel-imports";

const DEFAULT_UPLOAD_DIR: &str = "uploads";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_TEMPLATE_PATHS: [&str; 2] = ["planning/BMI-kosong.xlsx", "../planning/BMI-kosong.xlsx"];
const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSettings {
    pub db_path: String,
    pub upload_dir: PathBuf,
    pub bind_addr: String,
    pub template_paths: Vec<PathBuf>,
    pub max_upload_bytes: usize,
}

impl AppSettings {
    /// 从进程环境变量加载
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源加载（空白值视为未设置）
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let template_paths = match get(ENV_TEMPLATE_PATHS) {
            Some(raw) => raw
                .split(';')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(PathBuf::from)
                .collect(),
            None => DEFAULT_TEMPLATE_PATHS.iter().map(PathBuf::from).collect(),
        };

        Self {
            db_path: get(ENV_DB_PATH).unwrap_or_else(get_default_db_path),
            upload_dir: PathBuf::from(get(ENV_UPLOAD_DIR).unwrap_or_else(|| DEFAULT_UPLOAD_DIR.to_string())),
            bind_addr: get(ENV_BIND_ADDR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            template_paths,
            max_upload_bytes: get(ENV_MAX_UPLOAD_BYTES)
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
        }
    }

    /// 导入文件存放目录
    pub fn import_dir(&self) -> PathBuf {
        self.upload_dir.join(EXCEL_IMPORT_SUBDIR)
    }
}

/// 默认数据库路径
///
/// 优先使用用户数据目录（<data_dir>/hris-import/hris.db），
/// 无法获取时回退到当前目录。
pub fn get_default_db_path() -> String {
    let mut path = PathBuf::from("./hris.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("hris-import");
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("hris.db");
        }
    }

    path.to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let settings = AppSettings::from_lookup(|key| {
            (key == ENV_DB_PATH).then(|| "/tmp/x.db".to_string())
        });
        assert_eq!(settings.db_path, "/tmp/x.db");
        assert_eq!(settings.bind_addr, "0.0.0.0:3000");
        assert_eq!(settings.import_dir(), PathBuf::from("uploads/excel-imports"));
        assert_eq!(settings.template_paths.len(), 2);
        assert_eq!(settings.max_upload_bytes, 5 * 1024 * 1024);
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_DB_PATH, "hr.db"),
            (ENV_UPLOAD_DIR, "/data/up"),
            (ENV_BIND_ADDR, "127.0.0.1:8080"),
            (ENV_TEMPLATE_PATHS, "a.xlsx; ;b.xlsx"),
            (ENV_MAX_UPLOAD_BYTES, "1024"),
        ]
        .into_iter()
        .collect();

        let settings = AppSettings::from_lookup(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(settings.import_dir(), PathBuf::from("/data/up/excel-imports"));
        assert_eq!(settings.bind_addr, "127.0.0.1:8080");
        assert_eq!(
            settings.template_paths,
            vec![PathBuf::from("a.xlsx"), PathBuf::from("b.xlsx")]
        );
        assert_eq!(settings.max_upload_bytes, 1024);
    }
}
