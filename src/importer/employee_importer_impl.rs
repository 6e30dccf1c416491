// ==========================================
// 人事系统 - 员工导入器实现
// ==========================================
// 职责: 整合导入流程，从文件到数据库
// 预览: 解析 → 映射 → 主数据解析 → 冲突检测 → 字段校验
// 确认: 重新解析 + 重新校验 → 单事务落库 → 清理临时文件
// ==========================================

use crate::config::{ImportConfigReader, ImportSettings};
use crate::domain::employee::{
    ImportBatch, ImportExecutionResult, ImportValidationResult, NewEmployee, ParsedEmployeeData,
    ParsedRow,
};
use crate::domain::master_data::ReferenceKind;
use crate::importer::data_cleaner::DATE_FORMAT;
use crate::importer::employee_importer_trait::{EmployeeImporter, FieldMapper, FileParser};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::messages::ImportMessages;
use crate::importer::reference_cache::ReferenceCache;
use crate::importer::row_validator::RowValidator;
use crate::importer::temp_files::{cleanup_stale_files, TempUpload};
use crate::repository::EmployeeImportRepository;
use chrono::{Local, NaiveDate, Utc};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

// ==========================================
// EmployeeImporterImpl - 员工导入器实现
// ==========================================
pub struct EmployeeImporterImpl<R, C>
where
    R: EmployeeImportRepository,
    C: ImportConfigReader,
{
    // 数据访问层
    import_repo: R,

    // 配置读取器
    config: C,

    // 导入组件
    file_parser: Box<dyn FileParser>,
    field_mapper: Box<dyn FieldMapper>,
    row_validator: RowValidator,

    // 上传文件目录（过期清理范围）
    import_dir: PathBuf,
}

impl<R, C> EmployeeImporterImpl<R, C>
where
    R: EmployeeImportRepository,
    C: ImportConfigReader,
{
    /// 创建新的 EmployeeImporter 实例
    ///
    /// # 参数
    /// - import_repo: 导入数据仓储
    /// - config: 配置读取器
    /// - file_parser: 文件解析器
    /// - field_mapper: 字段映射器
    /// - row_validator: 行校验器
    /// - import_dir: 上传文件目录
    pub fn new(
        import_repo: R,
        config: C,
        file_parser: Box<dyn FileParser>,
        field_mapper: Box<dyn FieldMapper>,
        row_validator: RowValidator,
        import_dir: PathBuf,
    ) -> Self {
        Self {
            import_repo,
            config,
            file_parser,
            field_mapper,
            row_validator,
            import_dir,
        }
    }

    pub fn import_dir(&self) -> &Path {
        &self.import_dir
    }

    /// 读取主数据 + 已存在员工标识（并发等待）
    async fn build_reference_cache(&self) -> ImportResult<ReferenceCache> {
        let repo = &self.import_repo;
        let (divisi, department, posisi, status, lokasi, identities) = futures::try_join!(
            repo.list_reference_items(ReferenceKind::Divisi),
            repo.list_reference_items(ReferenceKind::Department),
            repo.list_reference_items(ReferenceKind::PosisiJabatan),
            repo.list_reference_items(ReferenceKind::StatusKaryawan),
            repo.list_reference_items(ReferenceKind::LokasiKerja),
            repo.list_employee_identities(),
        )?;

        Ok(ReferenceCache::build(
            vec![
                (ReferenceKind::Divisi, divisi),
                (ReferenceKind::Department, department),
                (ReferenceKind::PosisiJabatan, posisi),
                (ReferenceKind::StatusKaryawan, status),
                (ReferenceKind::LokasiKerja, lokasi),
            ],
            identities,
        ))
    }

    fn parse_rows(
        &self,
        file_path: &Path,
        settings: &ImportSettings,
        messages: &ImportMessages,
    ) -> ImportResult<Vec<ParsedRow>> {
        let raw_rows = self.file_parser.parse_to_raw_rows(file_path).map_err(|e| {
            error!(error = %e, "文件解析失败");
            e
        })?;
        debug!(row_count = raw_rows.len(), "文件解析完成");

        Ok(raw_rows
            .iter()
            .map(|row| {
                self.field_mapper
                    .map_to_parsed_row(row, settings.enum_coercion_policy, messages)
            })
            .collect())
    }

    async fn validate_with_settings(
        &self,
        file_path: &Path,
        settings: &ImportSettings,
    ) -> ImportResult<ImportValidationResult> {
        let messages = ImportMessages::new(&settings.message_locale);
        let rows = self.parse_rows(file_path, settings, &messages)?;
        let cache = self.build_reference_cache().await?;

        let result = self.row_validator.validate(rows, &cache, &messages);
        info!(
            total = result.summary.total_rows,
            valid = result.summary.valid_rows,
            invalid = result.summary.invalid_rows,
            "行校验完成"
        );
        Ok(result)
    }
}

/// 已校验行 → 待插入员工
///
/// tanggalMasuk 缺省为当天
fn to_new_employee(data: &ParsedEmployeeData, today: NaiveDate) -> NewEmployee {
    let parse_date = |value: Option<&str>| {
        value.and_then(|v| NaiveDate::parse_from_str(v, DATE_FORMAT).ok())
    };

    NewEmployee {
        id: Uuid::new_v4().to_string(),
        nama_lengkap: data.nama_lengkap.clone(),
        nomor_induk_karyawan: data.nomor_induk_karyawan.clone(),
        email_perusahaan: data.email_perusahaan.clone(),
        nomor_handphone: data.nomor_handphone.clone(),
        tempat_lahir: data.tempat_lahir.clone(),
        tanggal_lahir: parse_date(data.tanggal_lahir.as_deref()),
        jenis_kelamin: data.jenis_kelamin,
        agama: data.agama,
        golongan_darah: data.golongan_darah,
        status_pernikahan: data.status_pernikahan,
        alamat_ktp: data.alamat_ktp.clone(),
        alamat_domisili: data.alamat_domisili.clone(),
        divisi_id: data.divisi_id.clone(),
        department_id: data.department_id.clone(),
        posisi_jabatan_id: data.posisi_jabatan_id.clone(),
        status_karyawan_id: data.status_karyawan_id.clone(),
        lokasi_kerja_id: data.lokasi_kerja_id.clone(),
        tanggal_masuk: parse_date(data.tanggal_masuk.as_deref()).unwrap_or(today),
    }
}

#[async_trait::async_trait]
impl<R, C> EmployeeImporter for EmployeeImporterImpl<R, C>
where
    R: EmployeeImportRepository + Send + Sync,
    C: ImportConfigReader + Send + Sync,
{
    #[instrument(skip(self, file_path), fields(file = %file_path.display()))]
    async fn validate_file(&self, file_path: &Path) -> ImportResult<ImportValidationResult> {
        let settings = self.config.load_import_settings().await?;
        self.validate_with_settings(file_path, &settings).await
    }

    #[instrument(skip(self, file_path), fields(file = %file_path.display(), batch_id))]
    async fn execute_import(&self, file_path: &Path) -> ImportResult<ImportExecutionResult> {
        let start_time = Instant::now();

        // 上传文件在任何退出路径上都由守卫删除
        let mut upload = TempUpload::new(file_path.to_path_buf());
        let settings = self.config.load_import_settings().await?;

        // === 步骤 1: 重新解析 + 重新校验 ===
        let validation = self.validate_with_settings(upload.path(), &settings).await?;

        // === 步骤 2: 只保留无错误的行 ===
        let today = Local::now().date_naive();
        let employees: Vec<NewEmployee> = validation
            .valid_rows()
            .map(|row| to_new_employee(&row.data, today))
            .collect();
        if employees.is_empty() {
            warn!(total = validation.summary.total_rows, "无有效数据，未开启事务");
            return Err(ImportError::NoValidRows);
        }

        let batch_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("batch_id", batch_id.as_str());

        let batch = ImportBatch {
            batch_id: batch_id.clone(),
            file_name: file_path
                .file_name()
                .and_then(|n| n.to_str())
                .map(str::to_string),
            total_rows: validation.summary.total_rows as i64,
            valid_rows: validation.summary.valid_rows as i64,
            invalid_rows: validation.summary.invalid_rows as i64,
            success_rows: employees.len() as i64,
            imported_at: Utc::now(),
            elapsed_ms: Some(start_time.elapsed().as_millis() as i64),
        };

        // === 步骤 3: 单事务落库 ===
        let inserted = match self
            .import_repo
            .insert_employees_with_batch(employees, batch)
            .await
        {
            Ok(inserted) => inserted,
            Err(e) => {
                error!(error = %e, "导入事务失败，已回滚");
                if settings.retain_upload_on_failure {
                    upload.retain();
                }
                return Err(ImportError::ImportFailed(e.to_string()));
            }
        };

        // === 步骤 4: 清理过期临时文件 ===
        let max_age = Duration::from_secs(settings.temp_file_max_age_hours.saturating_mul(3600));
        match cleanup_stale_files(&self.import_dir, max_age) {
            Ok(removed) if removed > 0 => info!(removed, "已清理过期临时文件"),
            Ok(_) => {}
            Err(e) => warn!(error = %e, "过期临时文件清理失败"),
        }
        drop(upload);

        info!(
            batch_id = %batch_id,
            success_count = inserted.len(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "员工导入完成"
        );

        Ok(ImportExecutionResult {
            success_count: inserted.len(),
            data: inserted,
            batch_id,
        })
    }

    async fn list_recent_batches(&self, limit: usize) -> ImportResult<Vec<ImportBatch>> {
        Ok(self.import_repo.get_recent_batches(limit).await?)
    }
}
