// ==========================================
// ImportApi 端到端测试
// ==========================================
// 覆盖: 上传预览 → 确认导入 → 批次查询 → 模板查找
// ==========================================

use hris_import::api::{ApiError, ImportApi};
use hris_import::repository::EmployeeRepository;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

use test_helpers::{
    create_test_db, employee_row, employee_xlsx_bytes, open_shared, seed_references, valid_row,
    Cell,
};

fn build_api(conn: &std::sync::Arc<std::sync::Mutex<rusqlite::Connection>>, dir: &Path) -> ImportApi {
    ImportApi::new(conn.clone(), dir.join("excel-imports"), vec![dir.join("template.xlsx")])
}

#[tokio::test]
async fn test_upload_preview_and_confirm() {
    hris_import::logging::init_test();
    println!("\n=== 测试 ImportApi 上传 + 确认 ===\n");

    let (_db_file, db_path) = create_test_db().unwrap();
    let conn = open_shared(&db_path).unwrap();
    seed_references(&conn).unwrap();
    let dir = TempDir::new().unwrap();
    let api = build_api(&conn, dir.path());

    let bytes = employee_xlsx_bytes(&[
        valid_row("900001", "gita@corp.co.id"),
        employee_row(&[
            ("Nama Lengkap", Cell::Text("Hadi")),
            ("NIK", Cell::Text("900002")),
            ("Email Perusahaan", Cell::Text("bukan-email")),
            ("No. Handphone", Cell::Text("081234567890")),
        ]),
    ])
    .unwrap();

    // 步骤 1: 上传预览
    let preview = api
        .upload_and_preview("Data Karyawan.xlsx", &bytes)
        .await
        .expect("上传预览失败");
    println!("✓ 预览完成: {}", preview.temp_file_path);

    assert_eq!(preview.total_rows, 2);
    assert_eq!(preview.valid_rows, 1);
    assert_eq!(preview.invalid_rows, 1);
    assert_eq!(preview.preview.len(), 2, "预览包含全部行");
    assert_eq!(preview.errors.len(), 1, "错误列表只包含无效行");
    assert_eq!(preview.errors[0].row, 3);
    assert!(preview.errors[0].errors[0].contains("Format email tidak valid"));

    let stored = Path::new(&preview.temp_file_path);
    assert!(stored.is_file());
    assert!(stored.starts_with(dir.path().join("excel-imports")));
    assert_eq!(stored.extension().and_then(|e| e.to_str()), Some("xlsx"));

    // JSON 形态
    let json = serde_json::to_value(&preview).unwrap();
    assert_eq!(json["totalRows"], 2);
    assert!(json["tempFilePath"].is_string());
    assert_eq!(json["preview"][0]["rowNumber"], 2);

    // 步骤 2: 确认导入
    let result = api.confirm_import(&preview.temp_file_path).await.expect("确认失败");
    println!("✓ 导入 {} 条", result.success_count);
    assert_eq!(result.success_count, 1);
    assert!(!stored.exists());
    assert_eq!(EmployeeRepository::from_connection(conn.clone()).count().unwrap(), 1);

    // 步骤 3: 批次查询
    let batches = api.list_recent_batches(None).await.unwrap();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].file_name.as_deref(), stored.file_name().and_then(|n| n.to_str()));
    assert_eq!(batches[0].valid_rows, 1);
    assert_eq!(batches[0].invalid_rows, 1);

    // 同一文件不能再次确认
    let again = api.confirm_import(&preview.temp_file_path).await.unwrap_err();
    assert!(matches!(again, ApiError::NotFound(_)));

    println!("\n=== 测试通过 ===\n");
}

#[tokio::test]
async fn test_upload_rejects_unsupported_and_corrupt_files() {
    let (_db_file, db_path) = create_test_db().unwrap();
    let conn = open_shared(&db_path).unwrap();
    let dir = TempDir::new().unwrap();
    let api = build_api(&conn, dir.path());

    let err = api.upload_and_preview("karyawan.pdf", b"%PDF-1.4").await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput(_)));
    assert_eq!(err.code(), "INVALID_INPUT");

    let err = api.upload_and_preview("karyawan.xlsx", b"garbage").await.unwrap_err();
    assert!(matches!(err, ApiError::ImportError(_)));

    // 解析失败的文件不留在上传目录
    let leftovers = fs::read_dir(dir.path().join("excel-imports"))
        .map(|entries| entries.count())
        .unwrap_or(0);
    assert_eq!(leftovers, 0);
}

#[tokio::test]
async fn test_confirm_input_checks() {
    let (_db_file, db_path) = create_test_db().unwrap();
    let conn = open_shared(&db_path).unwrap();
    let dir = TempDir::new().unwrap();
    let api = build_api(&conn, dir.path());

    let blank = api.confirm_import("   ").await.unwrap_err();
    assert!(matches!(blank, ApiError::InvalidInput(ref m) if m == "File path is required"));

    let traversal = api.confirm_import("../hris.db").await.unwrap_err();
    assert!(matches!(traversal, ApiError::InvalidInput(_)));

    let missing = api.confirm_import("import-missing.xlsx").await.unwrap_err();
    assert!(matches!(missing, ApiError::NotFound(_)));

    // 上传目录之外的文件: 只取文件名，目录外文件不可达
    let outside = dir.path().join("outside.csv");
    fs::write(&outside, "Nama Lengkap,NIK\nBudi,1\n").unwrap();
    let err = api.confirm_import(&outside.display().to_string()).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
    assert!(outside.exists());
}

#[tokio::test]
async fn test_confirm_without_valid_rows_is_business_error() {
    let (_db_file, db_path) = create_test_db().unwrap();
    let conn = open_shared(&db_path).unwrap();
    let dir = TempDir::new().unwrap();
    let api = build_api(&conn, dir.path());

    let bytes = employee_xlsx_bytes(&[employee_row(&[("NIK", Cell::Text("1"))])]).unwrap();
    let preview = api.upload_and_preview("x.xlsx", &bytes).await.unwrap();
    assert_eq!(preview.valid_rows, 0);

    let err = api.confirm_import(&preview.temp_file_path).await.unwrap_err();
    assert!(matches!(err, ApiError::BusinessRuleViolation(_)));
    assert_eq!(err.message(), "Tidak ada data valid untuk diimport");
}

#[tokio::test]
async fn test_batch_limit_is_clamped() {
    let (_db_file, db_path) = create_test_db().unwrap();
    let conn = open_shared(&db_path).unwrap();
    seed_references(&conn).unwrap();
    let dir = TempDir::new().unwrap();
    let api = build_api(&conn, dir.path());

    for (nik, email) in [("910001", "a1@corp.co.id"), ("910002", "a2@corp.co.id")] {
        let bytes = employee_xlsx_bytes(&[valid_row(nik, email)]).unwrap();
        let preview = api.upload_and_preview("batch.xlsx", &bytes).await.unwrap();
        api.confirm_import(&preview.temp_file_path).await.unwrap();
    }

    assert_eq!(api.list_recent_batches(Some(0)).await.unwrap().len(), 1);
    assert_eq!(api.list_recent_batches(Some(1000)).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_template_path() {
    let (_db_file, db_path) = create_test_db().unwrap();
    let conn = open_shared(&db_path).unwrap();
    let dir = TempDir::new().unwrap();
    let api = build_api(&conn, dir.path());

    let err = api.template_path().unwrap_err();
    assert!(matches!(err, ApiError::NotFound(ref m) if m == "Template file not found"));

    let template = dir.path().join("template.xlsx");
    fs::write(&template, employee_xlsx_bytes(&[]).unwrap()).unwrap();
    assert_eq!(api.template_path().unwrap(), template);
}
