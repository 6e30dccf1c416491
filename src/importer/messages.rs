// ==========================================
// 人事系统 - 导入行错误消息
// ==========================================
// 按调用方指定的语言渲染，默认印尼语
// ==========================================

use crate::domain::master_data::ReferenceKind;
use crate::i18n::{normalize_locale, t, t_with_args, DEFAULT_LOCALE};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportMessages {
    locale: String,
}

impl Default for ImportMessages {
    fn default() -> Self {
        Self::new(DEFAULT_LOCALE)
    }
}

impl ImportMessages {
    pub fn new(locale: &str) -> Self {
        Self {
            locale: normalize_locale(locale),
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    fn label(&self, label_key: &str) -> String {
        t(&self.locale, label_key)
    }

    /// "<Label> wajib diisi"
    pub fn required_missing(&self, label_key: &str) -> String {
        t_with_args(
            &self.locale,
            "import.required_missing",
            &[("label", self.label(label_key).as_str())],
        )
    }

    /// "<Label> '<value>' tidak valid"
    pub fn enum_invalid(&self, label_key: &str, value: &str) -> String {
        t_with_args(
            &self.locale,
            "import.enum_invalid",
            &[("label", self.label(label_key).as_str()), ("value", value)],
        )
    }

    /// "<Label> '<name>' tidak ditemukan"
    pub fn reference_not_found(&self, kind: ReferenceKind, name: &str) -> String {
        t_with_args(
            &self.locale,
            "import.reference_not_found",
            &[("label", self.label(kind.label_key()).as_str()), ("name", name)],
        )
    }

    /// "NIK '<nik>' sudah terdaftar"
    pub fn nik_registered(&self, nik: &str) -> String {
        t_with_args(
            &self.locale,
            "import.already_registered",
            &[("label", self.label("label.nik").as_str()), ("value", nik)],
        )
    }

    /// "Email '<email>' sudah terdaftar"
    pub fn email_registered(&self, email: &str) -> String {
        t_with_args(
            &self.locale,
            "import.already_registered",
            &[("label", self.label("label.email").as_str()), ("value", email)],
        )
    }

    /// "Duplicate NIK '<nik>' dalam file import"
    pub fn duplicate_in_file(&self, nik: &str) -> String {
        t_with_args(&self.locale, "import.duplicate_in_file", &[("value", nik)])
    }

    /// "<fieldPath>: <message>"
    pub fn schema_violation(&self, field_path: &str, message_key: &str, args: &[(&str, &str)]) -> String {
        format!(
            "{}: {}",
            field_path,
            t_with_args(&self.locale, message_key, args)
        )
    }
}
