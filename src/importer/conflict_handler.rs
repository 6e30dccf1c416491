// ==========================================
// 人事系统 - 冲突处理器实现
// ==========================================
// 职责: 检测与库内已有员工冲突（NIK / 邮箱）+ 文件内重复 NIK
// ==========================================

use crate::domain::employee::{ParsedEmployeeData, ParsedRow};
use crate::importer::employee_importer_trait::{
    ConflictHandler as ConflictHandlerTrait, ExistingConflict,
};
use crate::importer::reference_cache::ReferenceCache;
use std::collections::HashSet;

pub struct ConflictHandler;

impl ConflictHandlerTrait for ConflictHandler {
    /// 检测文件内重复 NIK
    ///
    /// # 返回
    /// - Vec<(行下标, NIK)>: 重复记录列表（不包括第一次出现）
    fn detect_duplicates(&self, rows: &[ParsedRow]) -> Vec<(usize, String)> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut duplicates = Vec::new();

        for (idx, row) in rows.iter().enumerate() {
            if let Some(nik) = row.data.nomor_induk_karyawan.as_deref() {
                if !seen.insert(nik) {
                    duplicates.push((idx, nik.to_string()));
                }
            }
        }

        duplicates
    }

    /// 检测与库内已有员工的冲突
    fn detect_existing(
        &self,
        data: &ParsedEmployeeData,
        cache: &ReferenceCache,
    ) -> Vec<ExistingConflict> {
        let mut conflicts = Vec::new();

        if let Some(nik) = data.nomor_induk_karyawan.as_deref() {
            if cache.nik_exists(nik) {
                conflicts.push(ExistingConflict::Nik(nik.to_string()));
            }
        }
        if let Some(email) = data.email_perusahaan.as_deref() {
            if cache.email_exists(email) {
                conflicts.push(ExistingConflict::Email(email.to_string()));
            }
        }

        conflicts
    }
}
