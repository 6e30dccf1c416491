// ==========================================
// 人事系统 - 主数据（参照数据）
// ==========================================
// 五类组织主数据：部门分组 / 部门 / 职位 / 员工状态 / 工作地点
// 员工导入时按名称解析为 id
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// ReferenceKind - 主数据类别
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReferenceKind {
    Divisi,
    Department,
    PosisiJabatan,
    StatusKaryawan,
    LokasiKerja,
}

impl ReferenceKind {
    /// 全部类别（顺序即行内错误的追加顺序）
    pub const ALL: [ReferenceKind; 5] = [
        ReferenceKind::Divisi,
        ReferenceKind::Department,
        ReferenceKind::PosisiJabatan,
        ReferenceKind::StatusKaryawan,
        ReferenceKind::LokasiKerja,
    ];

    /// 数据库表名
    pub fn table(&self) -> &'static str {
        match self {
            ReferenceKind::Divisi => "divisi",
            ReferenceKind::Department => "department",
            ReferenceKind::PosisiJabatan => "posisi_jabatan",
            ReferenceKind::StatusKaryawan => "status_karyawan",
            ReferenceKind::LokasiKerja => "lokasi_kerja",
        }
    }

    /// 名称列
    pub fn name_column(&self) -> &'static str {
        match self {
            ReferenceKind::Divisi => "nama_divisi",
            ReferenceKind::Department => "nama_department",
            ReferenceKind::PosisiJabatan => "nama_posisi_jabatan",
            ReferenceKind::StatusKaryawan => "nama_status",
            ReferenceKind::LokasiKerja => "nama_lokasi_kerja",
        }
    }

    /// 行错误中使用的标签（i18n key）
    pub fn label_key(&self) -> &'static str {
        match self {
            ReferenceKind::Divisi => "label.divisi",
            ReferenceKind::Department => "label.department",
            ReferenceKind::PosisiJabatan => "label.posisi_jabatan",
            ReferenceKind::StatusKaryawan => "label.status_karyawan",
            ReferenceKind::LokasiKerja => "label.lokasi_kerja",
        }
    }
}

/// 主数据行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceItem {
    pub id: String,
    pub name: String,
}

impl ReferenceItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
