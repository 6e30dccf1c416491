// ==========================================
// 人事系统 - 导入临时文件管理
// ==========================================
// 职责: 上传文件落盘 / 确认路径约束 / 过期清理 / 模板查找
// 上传文件名: import-<毫秒时间戳>-<uuid>.<ext>
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use chrono::Utc;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::time::{Duration, SystemTime};
use tracing::{debug, warn};
use uuid::Uuid;

/// 允许上传的扩展名
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["xlsx", "xls", "csv"];

fn allowed_extension(file_name: &str) -> ImportResult<String> {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    if ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        Ok(ext)
    } else {
        Err(ImportError::UnsupportedFormat(ext))
    }
}

/// 保存上传内容到导入目录，返回生成的文件路径
pub fn store_upload(import_dir: &Path, original_name: &str, bytes: &[u8]) -> ImportResult<PathBuf> {
    let ext = allowed_extension(original_name)?;
    fs::create_dir_all(import_dir)?;

    let file_name = format!(
        "import-{}-{}.{}",
        Utc::now().timestamp_millis(),
        Uuid::new_v4(),
        ext
    );
    let path = import_dir.join(file_name);
    fs::write(&path, bytes)?;

    debug!(path = %path.display(), size = bytes.len(), "上传文件已保存");
    Ok(path)
}

/// 将确认请求中的路径约束到导入目录内
///
/// 只取文件名部分；含 `..` 或无文件名的路径直接拒绝
pub fn resolve_upload_path(import_dir: &Path, requested: &str) -> ImportResult<PathBuf> {
    let requested = requested.trim();
    if requested.is_empty() {
        return Err(ImportError::InvalidUploadPath(requested.to_string()));
    }

    let path = Path::new(requested);
    if path.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(ImportError::InvalidUploadPath(requested.to_string()));
    }

    match path.file_name() {
        Some(name) => Ok(import_dir.join(name)),
        None => Err(ImportError::InvalidUploadPath(requested.to_string())),
    }
}

/// 删除目录下修改时间早于 max_age 的文件，返回删除数量
pub fn cleanup_stale_files(dir: &Path, max_age: Duration) -> ImportResult<usize> {
    if !dir.exists() {
        return Ok(0);
    }

    let now = SystemTime::now();
    let mut removed = 0;

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let metadata = entry.metadata()?;
        if !metadata.is_file() {
            continue;
        }

        let modified = metadata.modified()?;
        let age = now.duration_since(modified).unwrap_or_default();
        if age >= max_age {
            match fs::remove_file(entry.path()) {
                Ok(()) => removed += 1,
                Err(e) => warn!(path = %entry.path().display(), error = %e, "过期文件删除失败"),
            }
        }
    }

    Ok(removed)
}

/// 按顺序查找模板文件（首个存在者胜出）
pub fn find_template(candidates: &[PathBuf]) -> ImportResult<PathBuf> {
    candidates
        .iter()
        .find(|p| p.is_file())
        .cloned()
        .ok_or(ImportError::TemplateNotFound)
}

// ==========================================
// TempUpload - 上传文件守卫
// ==========================================
// 离开作用域时删除文件（成功/无有效行/解析失败/事务失败）
// 调用 retain() 后保留，供调用方重试确认
pub struct TempUpload {
    path: PathBuf,
    retained: bool,
}

impl TempUpload {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            retained: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn retain(&mut self) {
        self.retained = true;
    }
}

impl Drop for TempUpload {
    fn drop(&mut self) {
        if self.retained {
            return;
        }
        if let Err(e) = fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %self.path.display(), error = %e, "上传文件删除失败");
            }
        }
    }
}
