// ==========================================
// 并发导入测试
// ==========================================
// 测试目标: 同一连接上的并发导入互不破坏；NIK 重叠时只有一方成功
// ==========================================


use hris_import::importer::{EmployeeImporter, ImportError};
use hris_import::logging;
use hris_import::repository::EmployeeRepository;
use std::time::Instant;
use tempfile::TempDir;
use test_helpers::{build_importer, create_test_db, open_shared, seed_references, valid_row, write_employee_xlsx};

#[tokio::test]
async fn test_concurrent_imports_with_disjoint_rows() {
    logging::init_test();
    println!("\n=== 测试：并发导入（无重叠）===\n");

    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = open_shared(&db_path).unwrap();
    seed_references(&conn).unwrap();
    let import_dir = TempDir::new().unwrap();

    let importer_a = build_importer(&conn, import_dir.path());
    let importer_b = build_importer(&conn, import_dir.path());

    let file_a = write_employee_xlsx(
        import_dir.path(),
        "a.xlsx",
        &[valid_row("130001", "a1@corp.co.id"), valid_row("130002", "a2@corp.co.id")],
    )
    .unwrap();
    let file_b = write_employee_xlsx(
        import_dir.path(),
        "b.xlsx",
        &[valid_row("130003", "b1@corp.co.id")],
    )
    .unwrap();

    let start = Instant::now();
    let (result_a, result_b) = tokio::join!(
        importer_a.execute_import(&file_a),
        importer_b.execute_import(&file_b)
    );
    println!("✓ 并发导入耗时: {:?}", start.elapsed());

    assert_eq!(result_a.expect("导入 A 失败").success_count, 2);
    assert_eq!(result_b.expect("导入 B 失败").success_count, 1);

    assert_eq!(EmployeeRepository::from_connection(conn.clone()).count().unwrap(), 3);
    assert_eq!(importer_a.list_recent_batches(10).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_concurrent_imports_with_overlapping_nik() {
    logging::init_test();
    println!("\n=== 测试：并发导入（NIK 重叠）===\n");

    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = open_shared(&db_path).unwrap();
    seed_references(&conn).unwrap();
    let import_dir = TempDir::new().unwrap();

    let importer_a = build_importer(&conn, import_dir.path());
    let importer_b = build_importer(&conn, import_dir.path());

    let file_a = write_employee_xlsx(
        import_dir.path(),
        "a.xlsx",
        &[valid_row("140001", "x1@corp.co.id")],
    )
    .unwrap();
    let file_b = write_employee_xlsx(
        import_dir.path(),
        "b.xlsx",
        &[valid_row("140001", "x2@corp.co.id")],
    )
    .unwrap();

    let (result_a, result_b) = tokio::join!(
        importer_a.execute_import(&file_a),
        importer_b.execute_import(&file_b)
    );

    let outcomes = [result_a, result_b];
    let succeeded = outcomes.iter().filter(|r| r.is_ok()).count();
    assert_eq!(succeeded, 1, "只有一方应成功");

    // 失败方: 校验时已看到对方数据（NoValidRows），或落库时撞上 UNIQUE 约束
    for outcome in &outcomes {
        if let Err(err) = outcome {
            println!("✓ 失败方: {}", err);
            match err {
                ImportError::NoValidRows => {}
                ImportError::ImportFailed(msg) => assert!(msg.contains("UNIQUE"), "{}", msg),
                other => panic!("意外错误: {:?}", other),
            }
        }
    }

    assert_eq!(EmployeeRepository::from_connection(conn.clone()).count().unwrap(), 1);
    assert_eq!(importer_a.list_recent_batches(10).await.unwrap().len(), 1);
}
