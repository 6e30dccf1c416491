// ==========================================
// 人事系统 - 行校验器
// ==========================================
// 阶段 2: ParsedRow → ImportValidationResult
// 顺序: 主数据解析 → 库内已存在 → 字段规则 → 文件内重复 NIK
// 说明: 纯函数，依赖已构建的 ReferenceCache，不访问数据库
// ==========================================

use crate::domain::employee::{ImportValidationResult, ParsedRow};
use crate::domain::master_data::ReferenceKind;
use crate::importer::conflict_handler::ConflictHandler;
use crate::importer::dq_validator::DqValidator;
use crate::importer::employee_importer_trait::{
    ConflictHandler as ConflictHandlerTrait, DqValidator as DqValidatorTrait, ExistingConflict,
};
use crate::importer::messages::ImportMessages;
use crate::importer::reference_cache::ReferenceCache;

pub struct RowValidator {
    conflict_handler: Box<dyn ConflictHandlerTrait>,
    dq_validator: Box<dyn DqValidatorTrait>,
}

impl Default for RowValidator {
    fn default() -> Self {
        Self::new(Box::new(ConflictHandler), Box::new(DqValidator))
    }
}

impl RowValidator {
    pub fn new(
        conflict_handler: Box<dyn ConflictHandlerTrait>,
        dq_validator: Box<dyn DqValidatorTrait>,
    ) -> Self {
        Self {
            conflict_handler,
            dq_validator,
        }
    }

    /// 校验全部行（不丢弃任何行，错误追加到各行 errors）
    pub fn validate(
        &self,
        mut rows: Vec<ParsedRow>,
        cache: &ReferenceCache,
        messages: &ImportMessages,
    ) -> ImportValidationResult {
        for row in rows.iter_mut() {
            self.resolve_references(row, cache, messages);
            self.check_existing(row, cache, messages);

            let violations = self.dq_validator.validate_schema(&row.data, messages);
            row.errors.extend(violations);
        }

        // 第二遍: 文件内重复 NIK（首次出现保留）
        for (idx, nik) in self.conflict_handler.detect_duplicates(&rows) {
            rows[idx].errors.push(messages.duplicate_in_file(&nik));
        }

        ImportValidationResult::from_rows(rows)
    }

    fn resolve_references(
        &self,
        row: &mut ParsedRow,
        cache: &ReferenceCache,
        messages: &ImportMessages,
    ) {
        for kind in ReferenceKind::ALL {
            let Some(name) = row.data.reference_name(kind) else {
                continue;
            };
            match cache.resolve(kind, name) {
                Some(id) => {
                    let id = id.to_string();
                    row.data.set_reference_id(kind, id);
                }
                None => {
                    let error = messages.reference_not_found(kind, name);
                    row.errors.push(error);
                }
            }
        }
    }

    fn check_existing(&self, row: &mut ParsedRow, cache: &ReferenceCache, messages: &ImportMessages) {
        for conflict in self.conflict_handler.detect_existing(&row.data, cache) {
            let error = match conflict {
                ExistingConflict::Nik(nik) => messages.nik_registered(&nik),
                ExistingConflict::Email(email) => messages.email_registered(&email),
            };
            row.errors.push(error);
        }
    }
}
