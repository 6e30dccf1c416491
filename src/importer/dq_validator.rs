// ==========================================
// 人事系统 - 数据质量校验器实现
// ==========================================
// 职责: 员工字段格式/长度校验（与手工录入同一套规则）
// 输出: "<字段路径>: <消息>"
// 说明: 只校验已出现的字段；枚举字段在映射阶段已按类型构造
// ==========================================

use crate::domain::employee::ParsedEmployeeData;
use crate::importer::data_cleaner::is_iso_date;
use crate::importer::employee_importer_trait::DqValidator as DqValidatorTrait;
use crate::importer::messages::ImportMessages;

pub const NAMA_LENGKAP_MAX: usize = 200;
pub const NIK_MAX: usize = 50;
pub const TEMPAT_LAHIR_MAX: usize = 100;
pub const ALAMAT_MAX: usize = 500;

/// 手机号: ^(\+62|62|0)[0-9]{9,12}$
pub fn is_valid_phone(value: &str) -> bool {
    let rest = if let Some(rest) = value.strip_prefix("+62") {
        rest
    } else if let Some(rest) = value.strip_prefix("62") {
        rest
    } else if let Some(rest) = value.strip_prefix('0') {
        rest
    } else {
        return false;
    };
    (9..=12).contains(&rest.len()) && rest.chars().all(|c| c.is_ascii_digit())
}

/// 邮箱格式: local@domain.tld（无空白，单个 @，域名各段非空且不以 - 开头结尾）
pub fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let (local, domain) = match value.split_once('@') {
        Some(parts) => parts,
        None => return false,
    };
    if local.is_empty()
        || domain.contains('@')
        || local.starts_with('.')
        || local.ends_with('.')
        || local.contains("..")
    {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    let labels_ok = labels.iter().all(|label| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_alphanumeric() || c == '-')
    });
    let tld_ok = labels
        .last()
        .map(|tld| tld.chars().count() >= 2 && tld.chars().all(char::is_alphabetic))
        .unwrap_or(false);

    labels_ok && tld_ok
}

pub struct DqValidator;

impl DqValidator {
    fn check_max(
        &self,
        field_path: &str,
        value: Option<&str>,
        max: usize,
        messages: &ImportMessages,
        errors: &mut Vec<String>,
    ) {
        if let Some(v) = value {
            if v.chars().count() > max {
                let max = max.to_string();
                errors.push(messages.schema_violation(
                    field_path,
                    "schema.max_length",
                    &[("max", max.as_str())],
                ));
            }
        }
    }

    fn check_date(
        &self,
        field_path: &str,
        value: Option<&str>,
        messages: &ImportMessages,
        errors: &mut Vec<String>,
    ) {
        if let Some(v) = value {
            if !is_iso_date(v) {
                errors.push(messages.schema_violation(field_path, "schema.date_invalid", &[]));
            }
        }
    }
}

impl DqValidatorTrait for DqValidator {
    fn validate_schema(&self, data: &ParsedEmployeeData, messages: &ImportMessages) -> Vec<String> {
        let mut errors = Vec::new();

        // 姓名
        if let Some(nama) = data.nama_lengkap.as_deref() {
            if nama.is_empty() {
                errors.push(messages.schema_violation("namaLengkap", "schema.nama_lengkap_required", &[]));
            }
        }
        self.check_max("namaLengkap", data.nama_lengkap.as_deref(), NAMA_LENGKAP_MAX, messages, &mut errors);

        // NIK
        if let Some(nik) = data.nomor_induk_karyawan.as_deref() {
            if nik.is_empty() {
                errors.push(messages.schema_violation("nomorIndukKaryawan", "schema.nik_required", &[]));
            }
        }
        self.check_max("nomorIndukKaryawan", data.nomor_induk_karyawan.as_deref(), NIK_MAX, messages, &mut errors);

        // 联系方式
        if let Some(email) = data.email_perusahaan.as_deref() {
            if !is_valid_email(email) {
                errors.push(messages.schema_violation("emailPerusahaan", "schema.email_invalid", &[]));
            }
        }
        if let Some(phone) = data.nomor_handphone.as_deref() {
            if !is_valid_phone(phone) {
                errors.push(messages.schema_violation("nomorHandphone", "schema.phone_invalid", &[]));
            }
        }

        // 长度上限
        self.check_max("tempatLahir", data.tempat_lahir.as_deref(), TEMPAT_LAHIR_MAX, messages, &mut errors);
        self.check_max("alamatKtp", data.alamat_ktp.as_deref(), ALAMAT_MAX, messages, &mut errors);
        self.check_max("alamatDomisili", data.alamat_domisili.as_deref(), ALAMAT_MAX, messages, &mut errors);

        // 日期（非日期透传值在此拒绝）
        self.check_date("tanggalLahir", data.tanggal_lahir.as_deref(), messages, &mut errors);
        self.check_date("tanggalMasuk", data.tanggal_masuk.as_deref(), messages, &mut errors);

        errors
    }
}
