// ==========================================
// 人事系统 - 员工导入 Repository 实现
// ==========================================
// 职责: 实现导入相关数据访问（使用 rusqlite）
// 红线: Repository 不含业务规则，只做数据 CRUD
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::employee::{Employee, EmployeeIdentity, ImportBatch, NewEmployee};
use crate::domain::master_data::{ReferenceItem, ReferenceKind};
use crate::repository::employee_import_repo::EmployeeImportRepository;
use crate::repository::employee_repo::{map_employee_row, EMPLOYEE_COLUMNS};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::master_data_repo::query_reference_items;
use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, Connection, Transaction};
use std::sync::{Arc, Mutex};
use tracing::debug;

// ==========================================
// EmployeeImportRepositoryImpl
// ==========================================
pub struct EmployeeImportRepositoryImpl {
    conn: Arc<Mutex<Connection>>,
}

impl EmployeeImportRepositoryImpl {
    /// 创建新的 Repository 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 共享已有连接
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 在事务中按顺序插入员工，并回读落库结果
    fn insert_employees_tx(
        tx: &Transaction,
        employees: &[NewEmployee],
    ) -> RepositoryResult<Vec<Employee>> {
        let mut insert = tx.prepare(
            r#"
            INSERT INTO employee (
                id, nama_lengkap, nomor_induk_karyawan, email_perusahaan, nomor_handphone,
                tempat_lahir, tanggal_lahir, jenis_kelamin, agama, golongan_darah,
                status_pernikahan, alamat_ktp, alamat_domisili,
                divisi_id, department_id, posisi_jabatan_id, status_karyawan_id, lokasi_kerja_id,
                tanggal_masuk, created_at, updated_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11,
                ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21
            )
            "#,
        )?;
        let mut select = tx.prepare(&format!(
            "SELECT {} FROM employee WHERE id = ?1",
            EMPLOYEE_COLUMNS
        ))?;

        let mut inserted = Vec::with_capacity(employees.len());
        for employee in employees {
            let now = Utc::now();
            insert.execute(params![
                employee.id,
                employee.nama_lengkap,
                employee.nomor_induk_karyawan,
                employee.email_perusahaan,
                employee.nomor_handphone,
                employee.tempat_lahir,
                employee.tanggal_lahir,
                employee.jenis_kelamin.map(|v| v.as_str()),
                employee.agama.map(|v| v.as_str()),
                employee.golongan_darah.map(|v| v.as_str()),
                employee.status_pernikahan.map(|v| v.as_str()),
                employee.alamat_ktp,
                employee.alamat_domisili,
                employee.divisi_id,
                employee.department_id,
                employee.posisi_jabatan_id,
                employee.status_karyawan_id,
                employee.lokasi_kerja_id,
                employee.tanggal_masuk,
                now,
                now,
            ])?;
            inserted.push(select.query_row(params![employee.id], map_employee_row)?);
        }

        Ok(inserted)
    }

    /// 在事务中写入批次记录
    fn insert_batch_tx(tx: &Transaction, batch: &ImportBatch) -> RepositoryResult<()> {
        tx.execute(
            r#"
            INSERT INTO import_batch (
                batch_id, file_name, total_rows, valid_rows, invalid_rows,
                success_rows, imported_at, elapsed_ms
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                batch.batch_id,
                batch.file_name,
                batch.total_rows,
                batch.valid_rows,
                batch.invalid_rows,
                batch.success_rows,
                batch.imported_at,
                batch.elapsed_ms,
            ],
        )?;
        Ok(())
    }
}

#[async_trait]
impl EmployeeImportRepository for EmployeeImportRepositoryImpl {
    async fn list_reference_items(&self, kind: ReferenceKind) -> RepositoryResult<Vec<ReferenceItem>> {
        let conn = self.get_conn()?;
        query_reference_items(&conn, kind)
    }

    async fn list_employee_identities(&self) -> RepositoryResult<Vec<EmployeeIdentity>> {
        let conn = self.get_conn()?;
        let mut stmt =
            conn.prepare("SELECT nomor_induk_karyawan, email_perusahaan FROM employee")?;
        let rows = stmt.query_map([], |row| {
            Ok(EmployeeIdentity {
                nomor_induk_karyawan: row.get(0)?,
                email_perusahaan: row.get(1)?,
            })
        })?;
        let identities = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(identities)
    }

    async fn insert_employees_with_batch(
        &self,
        employees: Vec<NewEmployee>,
        batch: ImportBatch,
    ) -> RepositoryResult<Vec<Employee>> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;

        // 任一语句失败时 tx 随 ? 提前返回被 drop，自动回滚
        let inserted = Self::insert_employees_tx(&tx, &employees)?;
        Self::insert_batch_tx(&tx, &batch)?;

        tx.commit()?;
        debug!(batch_id = %batch.batch_id, inserted = inserted.len(), "员工导入事务已提交");
        Ok(inserted)
    }

    async fn get_recent_batches(&self, limit: usize) -> RepositoryResult<Vec<ImportBatch>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT batch_id, file_name, total_rows, valid_rows, invalid_rows,
                   success_rows, imported_at, elapsed_ms
            FROM import_batch
            ORDER BY imported_at DESC
            LIMIT ?1
            "#,
        )?;
        let rows = stmt.query_map(params![limit as i64], |row| {
            Ok(ImportBatch {
                batch_id: row.get(0)?,
                file_name: row.get(1)?,
                total_rows: row.get(2)?,
                valid_rows: row.get(3)?,
                invalid_rows: row.get(4)?,
                success_rows: row.get(5)?,
                imported_at: row.get(6)?,
                elapsed_ms: row.get(7)?,
            })
        })?;
        let batches = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(batches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_in_memory;
    use chrono::NaiveDate;

    fn new_employee(nik: &str, email: Option<&str>, phone: Option<&str>) -> NewEmployee {
        NewEmployee {
            id: uuid::Uuid::new_v4().to_string(),
            nama_lengkap: Some(format!("Karyawan {}", nik)),
            nomor_induk_karyawan: Some(nik.to_string()),
            email_perusahaan: email.map(str::to_string),
            nomor_handphone: phone.map(str::to_string),
            tempat_lahir: None,
            tanggal_lahir: NaiveDate::from_ymd_opt(1990, 1, 2),
            jenis_kelamin: None,
            agama: None,
            golongan_darah: None,
            status_pernikahan: None,
            alamat_ktp: None,
            alamat_domisili: None,
            divisi_id: None,
            department_id: None,
            posisi_jabatan_id: None,
            status_karyawan_id: None,
            lokasi_kerja_id: None,
            tanggal_masuk: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        }
    }

    fn batch(id: &str, success_rows: i64) -> ImportBatch {
        ImportBatch {
            batch_id: id.to_string(),
            file_name: Some("import.xlsx".to_string()),
            total_rows: success_rows,
            valid_rows: success_rows,
            invalid_rows: 0,
            success_rows,
            imported_at: Utc::now(),
            elapsed_ms: Some(5),
        }
    }

    fn repo() -> EmployeeImportRepositoryImpl {
        EmployeeImportRepositoryImpl::from_connection(Arc::new(Mutex::new(open_in_memory().unwrap())))
    }

    #[tokio::test]
    async fn test_insert_with_batch_commits() {
        let repo = repo();
        let employees = vec![
            new_employee("1001", Some("a@corp.id"), Some("081234567890")),
            new_employee("1002", Some("b@corp.id"), Some("081234567891")),
        ];

        let inserted = repo
            .insert_employees_with_batch(employees, batch("B1", 2))
            .await
            .unwrap();

        assert_eq!(inserted.len(), 2);
        assert_eq!(inserted[0].nomor_induk_karyawan, "1001");
        assert_eq!(inserted[1].tanggal_lahir, NaiveDate::from_ymd_opt(1990, 1, 2));

        let identities = repo.list_employee_identities().await.unwrap();
        assert_eq!(identities.len(), 2);

        let batches = repo.get_recent_batches(10).await.unwrap();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].success_rows, 2);
    }

    #[tokio::test]
    async fn test_insert_failure_rolls_back_everything() {
        let repo = repo();
        let employees = vec![
            new_employee("1001", Some("a@corp.id"), Some("081234567890")),
            new_employee("1002", Some("b@corp.id"), Some("081234567891")),
            new_employee("1003", Some("c@corp.id"), None),
        ];

        let err = repo
            .insert_employees_with_batch(employees, batch("B1", 3))
            .await
            .unwrap_err();

        assert!(matches!(err, RepositoryError::NotNullViolation(_)));
        assert!(repo.list_employee_identities().await.unwrap().is_empty());
        assert!(repo.get_recent_batches(10).await.unwrap().is_empty());
    }
}
