// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持印尼语（默认）和英文
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// 导入消息按调用方传入的 locale 渲染，不依赖全局 locale
// ==========================================

/// 默认语言
pub const DEFAULT_LOCALE: &str = "id";

/// 是否为已加载的语言
pub fn is_supported_locale(locale: &str) -> bool {
    rust_i18n::available_locales!()
        .iter()
        .any(|l| *l == locale)
}

/// 规范化语言代码（未加载的语言回退为默认语言）
pub fn normalize_locale(locale: &str) -> String {
    let trimmed = locale.trim();
    if is_supported_locale(trimmed) {
        trimmed.to_string()
    } else {
        DEFAULT_LOCALE.to_string()
    }
}

/// 翻译消息（无参数）
///
/// # 示例
/// ```no_run
/// use hris_import::i18n::t;
/// let msg = t("id", "label.divisi");
/// ```
pub fn t(locale: &str, key: &str) -> String {
    rust_i18n::t!(key, locale = locale).to_string()
}

/// 翻译消息（带参数）
///
/// # 示例
/// ```no_run
/// use hris_import::i18n::t_with_args;
/// let msg = t_with_args("id", "import.required_missing", &[("label", "NIK")]);
/// ```
pub fn t_with_args(locale: &str, key: &str, args: &[(&str, &str)]) -> String {
    let mut result = t(locale, key);
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}
