// ==========================================
// 人事系统 - 员工数据仓储
// ==========================================
// 职责: employee 表的只读查询 + 行映射
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::employee::Employee;
use crate::domain::types::{Agama, GolonganDarah, JenisKelamin, StatusPernikahan};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex};

/// employee 表查询列（顺序与 map_employee_row 一致）
pub(crate) const EMPLOYEE_COLUMNS: &str = r#"
    id, nama_lengkap, nomor_induk_karyawan, email_perusahaan, nomor_handphone,
    tempat_lahir, tanggal_lahir, jenis_kelamin, agama, golongan_darah,
    status_pernikahan, alamat_ktp, alamat_domisili,
    divisi_id, department_id, posisi_jabatan_id, status_karyawan_id, lokasi_kerja_id,
    tanggal_masuk, created_at, updated_at
"#;

/// 将一行 employee 映射为领域对象
pub(crate) fn map_employee_row(row: &Row<'_>) -> rusqlite::Result<Employee> {
    let jenis_kelamin: Option<String> = row.get(7)?;
    let agama: Option<String> = row.get(8)?;
    let golongan_darah: Option<String> = row.get(9)?;
    let status_pernikahan: Option<String> = row.get(10)?;

    Ok(Employee {
        id: row.get(0)?,
        nama_lengkap: row.get(1)?,
        nomor_induk_karyawan: row.get(2)?,
        email_perusahaan: row.get(3)?,
        nomor_handphone: row.get(4)?,
        tempat_lahir: row.get(5)?,
        tanggal_lahir: row.get(6)?,
        jenis_kelamin: jenis_kelamin.as_deref().and_then(JenisKelamin::from_token),
        agama: agama.as_deref().and_then(Agama::from_token),
        golongan_darah: golongan_darah.as_deref().and_then(GolonganDarah::from_token),
        status_pernikahan: status_pernikahan.as_deref().and_then(StatusPernikahan::from_token),
        alamat_ktp: row.get(11)?,
        alamat_domisili: row.get(12)?,
        divisi_id: row.get(13)?,
        department_id: row.get(14)?,
        posisi_jabatan_id: row.get(15)?,
        status_karyawan_id: row.get(16)?,
        lokasi_kerja_id: row.get(17)?,
        tanggal_masuk: row.get(18)?,
        created_at: row.get(19)?,
        updated_at: row.get(20)?,
    })
}

// ==========================================
// EmployeeRepository
// ==========================================
pub struct EmployeeRepository {
    conn: Arc<Mutex<Connection>>,
}

impl EmployeeRepository {
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 员工总数
    pub fn count(&self) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let count = conn.query_row("SELECT COUNT(*) FROM employee", [], |row| row.get(0))?;
        Ok(count)
    }

    /// 按 NIK 查询
    pub fn find_by_nik(&self, nik: &str) -> RepositoryResult<Option<Employee>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT {} FROM employee WHERE nomor_induk_karyawan = ?1",
            EMPLOYEE_COLUMNS
        );
        let employee = conn
            .query_row(&sql, params![nik], map_employee_row)
            .optional()?;
        Ok(employee)
    }

    /// 全部员工（按 NIK 排序）
    pub fn list_all(&self) -> RepositoryResult<Vec<Employee>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT {} FROM employee ORDER BY nomor_induk_karyawan",
            EMPLOYEE_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map([], map_employee_row)?;
        let employees = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(employees)
    }
}
