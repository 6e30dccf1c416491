// ==========================================
// 人事系统 - 员工领域模型
// ==========================================
// 职责: 员工实体 + 导入管道中间结构
// 序列化格式: camelCase（与前端约定一致）
// ==========================================

use crate::domain::master_data::ReferenceKind;
use crate::domain::types::{Agama, GolonganDarah, JenisKelamin, StatusPernikahan};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// ParsedEmployeeData - 解析后的员工数据（部分字段）
// ==========================================
// 用途: Sheet Parser 输出，Row Validator 填充 *_id
// 日期字段保持字符串：合法日期为 YYYY-MM-DD，非日期原样透传由校验拒绝
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedEmployeeData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nama_lengkap: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nomor_induk_karyawan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_perusahaan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nomor_handphone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tempat_lahir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tanggal_lahir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jenis_kelamin: Option<JenisKelamin>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agama: Option<Agama>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub golongan_darah: Option<GolonganDarah>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_pernikahan: Option<StatusPernikahan>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alamat_ktp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alamat_domisili: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tanggal_masuk: Option<String>,

    // ===== 主数据名称（表格原文）=====
    #[serde(skip_serializing_if = "Option::is_none")]
    pub divisi_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posisi_jabatan_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_karyawan_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lokasi_kerja_name: Option<String>,

    // ===== 主数据 id（校验阶段解析）=====
    #[serde(skip_serializing_if = "Option::is_none")]
    pub divisi_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posisi_jabatan_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_karyawan_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lokasi_kerja_id: Option<String>,
}

impl ParsedEmployeeData {
    /// 指定类别的主数据名称
    pub fn reference_name(&self, kind: ReferenceKind) -> Option<&str> {
        let name = match kind {
            ReferenceKind::Divisi => &self.divisi_name,
            ReferenceKind::Department => &self.department_name,
            ReferenceKind::PosisiJabatan => &self.posisi_jabatan_name,
            ReferenceKind::StatusKaryawan => &self.status_karyawan_name,
            ReferenceKind::LokasiKerja => &self.lokasi_kerja_name,
        };
        name.as_deref()
    }

    /// 指定类别已解析的 id
    pub fn reference_id(&self, kind: ReferenceKind) -> Option<&str> {
        let id = match kind {
            ReferenceKind::Divisi => &self.divisi_id,
            ReferenceKind::Department => &self.department_id,
            ReferenceKind::PosisiJabatan => &self.posisi_jabatan_id,
            ReferenceKind::StatusKaryawan => &self.status_karyawan_id,
            ReferenceKind::LokasiKerja => &self.lokasi_kerja_id,
        };
        id.as_deref()
    }

    pub fn set_reference_id(&mut self, kind: ReferenceKind, id: String) {
        let slot = match kind {
            ReferenceKind::Divisi => &mut self.divisi_id,
            ReferenceKind::Department => &mut self.department_id,
            ReferenceKind::PosisiJabatan => &mut self.posisi_jabatan_id,
            ReferenceKind::StatusKaryawan => &mut self.status_karyawan_id,
            ReferenceKind::LokasiKerja => &mut self.lokasi_kerja_id,
        };
        *slot = Some(id);
    }
}

// ==========================================
// ParsedRow - 导入管道中的一行
// ==========================================
// row_number: 表格物理行号（表头 = 1，首个数据行 = 2）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedRow {
    pub data: ParsedEmployeeData,
    pub row_number: usize,
    pub errors: Vec<String>,
}

impl ParsedRow {
    pub fn new(data: ParsedEmployeeData, row_number: usize) -> Self {
        Self {
            data,
            row_number,
            errors: Vec::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

// ==========================================
// ImportValidationResult - 校验结果
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportValidationSummary {
    pub total_rows: usize,
    pub valid_rows: usize,
    pub invalid_rows: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportValidationResult {
    pub summary: ImportValidationSummary,
    pub results: Vec<ParsedRow>,
}

impl ImportValidationResult {
    /// 由已校验的行汇总统计（valid + invalid == total）
    pub fn from_rows(results: Vec<ParsedRow>) -> Self {
        let total_rows = results.len();
        let valid_rows = results.iter().filter(|r| r.is_valid()).count();
        Self {
            summary: ImportValidationSummary {
                total_rows,
                valid_rows,
                invalid_rows: total_rows - valid_rows,
            },
            results,
        }
    }

    pub fn valid_rows(&self) -> impl Iterator<Item = &ParsedRow> {
        self.results.iter().filter(|r| r.is_valid())
    }
}

// ==========================================
// NewEmployee - 待插入员工
// ==========================================
// 必填列的非空约束由数据库负责
#[derive(Debug, Clone, PartialEq)]
pub struct NewEmployee {
    pub id: String,
    pub nama_lengkap: Option<String>,
    pub nomor_induk_karyawan: Option<String>,
    pub email_perusahaan: Option<String>,
    pub nomor_handphone: Option<String>,
    pub tempat_lahir: Option<String>,
    pub tanggal_lahir: Option<NaiveDate>,
    pub jenis_kelamin: Option<JenisKelamin>,
    pub agama: Option<Agama>,
    pub golongan_darah: Option<GolonganDarah>,
    pub status_pernikahan: Option<StatusPernikahan>,
    pub alamat_ktp: Option<String>,
    pub alamat_domisili: Option<String>,
    pub divisi_id: Option<String>,
    pub department_id: Option<String>,
    pub posisi_jabatan_id: Option<String>,
    pub status_karyawan_id: Option<String>,
    pub lokasi_kerja_id: Option<String>,
    pub tanggal_masuk: NaiveDate,
}

// ==========================================
// Employee - 员工（已落库）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: String,
    pub nama_lengkap: String,
    pub nomor_induk_karyawan: String,
    pub email_perusahaan: String,
    pub nomor_handphone: String,
    pub tempat_lahir: Option<String>,
    pub tanggal_lahir: Option<NaiveDate>,
    pub jenis_kelamin: Option<JenisKelamin>,
    pub agama: Option<Agama>,
    pub golongan_darah: Option<GolonganDarah>,
    pub status_pernikahan: Option<StatusPernikahan>,
    pub alamat_ktp: Option<String>,
    pub alamat_domisili: Option<String>,
    pub divisi_id: Option<String>,
    pub department_id: Option<String>,
    pub posisi_jabatan_id: Option<String>,
    pub status_karyawan_id: Option<String>,
    pub lokasi_kerja_id: Option<String>,
    pub tanggal_masuk: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 已存在员工的唯一标识（NIK + 公司邮箱）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeIdentity {
    pub nomor_induk_karyawan: String,
    pub email_perusahaan: Option<String>,
}

// ==========================================
// ImportBatch - 导入批次
// ==========================================
// 与员工插入处于同一事务，回滚时不留批次记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportBatch {
    pub batch_id: String,
    pub file_name: Option<String>,
    pub total_rows: i64,
    pub valid_rows: i64,
    pub invalid_rows: i64,
    pub success_rows: i64,
    pub imported_at: DateTime<Utc>,
    pub elapsed_ms: Option<i64>,
}

/// 执行导入的结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportExecutionResult {
    pub success_count: usize,
    pub data: Vec<Employee>,
    pub batch_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parsed_row_serializes_camel_case_and_omits_absent() {
        let data = ParsedEmployeeData {
            nama_lengkap: Some("Budi".to_string()),
            nomor_induk_karyawan: Some("123456".to_string()),
            divisi_name: Some("Divisi IT".to_string()),
            ..Default::default()
        };
        let row = ParsedRow::new(data, 2);
        let json = serde_json::to_value(&row).unwrap();

        assert_eq!(json["rowNumber"], 2);
        assert_eq!(json["data"]["namaLengkap"], "Budi");
        assert_eq!(json["data"]["divisiName"], "Divisi IT");
        assert!(json["data"].get("divisiId").is_none());
        assert!(json["data"].get("emailPerusahaan").is_none());
    }

    #[test]
    fn test_validation_summary_counts() {
        let ok = ParsedRow::new(ParsedEmployeeData::default(), 2);
        let mut bad = ParsedRow::new(ParsedEmployeeData::default(), 3);
        bad.errors.push("x".to_string());

        let result = ImportValidationResult::from_rows(vec![ok, bad]);
        assert_eq!(result.summary.total_rows, 2);
        assert_eq!(result.summary.valid_rows, 1);
        assert_eq!(result.summary.invalid_rows, 1);
        assert_eq!(result.valid_rows().count(), 1);
    }

    #[test]
    fn test_reference_id_slots() {
        let mut data = ParsedEmployeeData::default();
        for kind in ReferenceKind::ALL {
            assert!(data.reference_id(kind).is_none());
            data.set_reference_id(kind, format!("id-{}", kind.table()));
        }
        assert_eq!(data.reference_id(ReferenceKind::LokasiKerja), Some("id-lokasi_kerja"));
    }
}
