// ==========================================
// 人事系统 - 字段映射器实现
// ==========================================
// 阶段 1: 原始行 → ParsedRow
// 职责: 表头别名匹配 + 类型转换 + 必填检查 + 枚举策略
// ==========================================

use crate::domain::employee::{ParsedEmployeeData, ParsedRow};
use crate::domain::types::{Agama, EnumCoercionPolicy, GolonganDarah, JenisKelamin, StatusPernikahan};
use crate::importer::data_cleaner::{DataCleaner, EnumCell};
use crate::importer::employee_importer_trait::FieldMapper as FieldMapperTrait;
use crate::importer::file_parser::{RawCell, RawRow};
use crate::importer::messages::ImportMessages;

// ==========================================
// 表头（含别名，按顺序匹配，忽略大小写）
// ==========================================
pub mod columns {
    pub const NAMA_LENGKAP: &[&str] = &["Nama Lengkap"];
    pub const NIK: &[&str] = &["NIK", "Nomor Induk Karyawan"];
    pub const EMAIL_PERUSAHAAN: &[&str] = &["Email Perusahaan", "Email"];
    pub const NOMOR_HANDPHONE: &[&str] = &["No. Handphone", "No Handphone", "Nomor Handphone"];
    pub const TEMPAT_LAHIR: &[&str] = &["Tempat Lahir"];
    pub const TANGGAL_LAHIR: &[&str] = &["Tanggal Lahir"];
    pub const JENIS_KELAMIN: &[&str] = &["Jenis Kelamin"];
    pub const AGAMA: &[&str] = &["Agama"];
    pub const GOLONGAN_DARAH: &[&str] = &["Golongan Darah"];
    pub const STATUS_PERNIKAHAN: &[&str] = &["Status Pernikahan"];
    pub const ALAMAT_KTP: &[&str] = &["Alamat KTP"];
    pub const ALAMAT_DOMISILI: &[&str] = &["Alamat Domisili"];
    pub const DIVISI: &[&str] = &["Divisi"];
    pub const DEPARTMENT: &[&str] = &["Department"];
    pub const POSISI_JABATAN: &[&str] = &["Posisi Jabatan", "Posisi"];
    pub const STATUS_KARYAWAN: &[&str] = &["Status Karyawan"];
    pub const LOKASI_KERJA: &[&str] = &["Lokasi Kerja"];
    pub const TANGGAL_MASUK: &[&str] = &["Tanggal Masuk"];

    /// 模板表头顺序
    pub const TEMPLATE_HEADERS: [&str; 18] = [
        "Nama Lengkap",
        "NIK",
        "Email Perusahaan",
        "No. Handphone",
        "Tempat Lahir",
        "Tanggal Lahir",
        "Jenis Kelamin",
        "Agama",
        "Golongan Darah",
        "Status Pernikahan",
        "Alamat KTP",
        "Alamat Domisili",
        "Divisi",
        "Department",
        "Posisi Jabatan",
        "Status Karyawan",
        "Lokasi Kerja",
        "Tanggal Masuk",
    ];
}

static EMPTY_CELL: RawCell = RawCell::Empty;

/// 按别名取单元格（缺列视为空）
fn lookup<'a>(row: &'a RawRow, aliases: &[&str]) -> &'a RawCell {
    aliases
        .iter()
        .find_map(|alias| {
            row.cells
                .iter()
                .find(|(header, _)| header.trim().eq_ignore_ascii_case(alias))
                .map(|(_, cell)| cell)
        })
        .unwrap_or(&EMPTY_CELL)
}

pub struct FieldMapper {
    cleaner: DataCleaner,
}

impl Default for FieldMapper {
    fn default() -> Self {
        Self { cleaner: DataCleaner }
    }
}

impl FieldMapper {
    pub fn new() -> Self {
        Self::default()
    }

    fn text(&self, row: &RawRow, aliases: &[&str]) -> Option<String> {
        self.cleaner.cell_to_text(lookup(row, aliases))
    }

    fn date(&self, row: &RawRow, aliases: &[&str]) -> Option<String> {
        self.cleaner.coerce_date(lookup(row, aliases))
    }

    /// 枚举字段：识别失败时按策略决定是否记为行错误
    #[allow(clippy::too_many_arguments)]
    fn enum_field<T>(
        &self,
        row: &RawRow,
        aliases: &[&str],
        parse: fn(&str) -> Option<T>,
        label_key: &str,
        policy: EnumCoercionPolicy,
        messages: &ImportMessages,
        errors: &mut Vec<String>,
    ) -> Option<T> {
        match self.cleaner.coerce_enum(lookup(row, aliases), parse) {
            EnumCell::Absent => None,
            EnumCell::Valid(value) => Some(value),
            EnumCell::Unrecognized(text) => {
                if policy == EnumCoercionPolicy::Strict {
                    errors.push(messages.enum_invalid(label_key, &text));
                }
                None
            }
        }
    }
}

impl FieldMapperTrait for FieldMapper {
    fn map_to_parsed_row(
        &self,
        row: &RawRow,
        policy: EnumCoercionPolicy,
        messages: &ImportMessages,
    ) -> ParsedRow {
        let mut errors = Vec::new();

        let nama_lengkap = self.text(row, columns::NAMA_LENGKAP);
        let nomor_induk_karyawan = self.text(row, columns::NIK);
        let email_perusahaan = self.text(row, columns::EMAIL_PERUSAHAAN);
        let nomor_handphone = self.text(row, columns::NOMOR_HANDPHONE);

        // 必填检查（不短路，继续映射其余字段）
        for (value, label_key) in [
            (&nama_lengkap, "label.nama_lengkap"),
            (&nomor_induk_karyawan, "label.nik"),
            (&email_perusahaan, "label.email"),
            (&nomor_handphone, "label.nomor_handphone"),
        ] {
            if value.is_none() {
                errors.push(messages.required_missing(label_key));
            }
        }

        let jenis_kelamin = self.enum_field(
            row,
            columns::JENIS_KELAMIN,
            JenisKelamin::from_token,
            "label.jenis_kelamin",
            policy,
            messages,
            &mut errors,
        );
        let agama = self.enum_field(
            row,
            columns::AGAMA,
            Agama::from_token,
            "label.agama",
            policy,
            messages,
            &mut errors,
        );
        let golongan_darah = self.enum_field(
            row,
            columns::GOLONGAN_DARAH,
            GolonganDarah::from_token,
            "label.golongan_darah",
            policy,
            messages,
            &mut errors,
        );
        let status_pernikahan = self.enum_field(
            row,
            columns::STATUS_PERNIKAHAN,
            StatusPernikahan::from_token,
            "label.status_pernikahan",
            policy,
            messages,
            &mut errors,
        );

        let data = ParsedEmployeeData {
            nama_lengkap,
            nomor_induk_karyawan,
            email_perusahaan,
            nomor_handphone,
            tempat_lahir: self.text(row, columns::TEMPAT_LAHIR),
            tanggal_lahir: self.date(row, columns::TANGGAL_LAHIR),
            jenis_kelamin,
            agama,
            golongan_darah,
            status_pernikahan,
            alamat_ktp: self.text(row, columns::ALAMAT_KTP),
            alamat_domisili: self.text(row, columns::ALAMAT_DOMISILI),
            tanggal_masuk: self.date(row, columns::TANGGAL_MASUK),
            divisi_name: self.text(row, columns::DIVISI),
            department_name: self.text(row, columns::DEPARTMENT),
            posisi_jabatan_name: self.text(row, columns::POSISI_JABATAN),
            status_karyawan_name: self.text(row, columns::STATUS_KARYAWAN),
            lokasi_kerja_name: self.text(row, columns::LOKASI_KERJA),
            ..Default::default()
        };

        ParsedRow {
            data,
            row_number: row.row_number,
            errors,
        }
    }
}
