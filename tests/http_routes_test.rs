// ==========================================
// HTTP 路由测试
// ==========================================
// 直接驱动 axum Router（tower::ServiceExt::oneshot），不监听端口
// ==========================================

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use hris_import::app::{build_router, AppState};
use hris_import::config::app_settings::{ENV_DB_PATH, ENV_TEMPLATE_PATHS, ENV_UPLOAD_DIR};
use hris_import::config::AppSettings;
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;
use tower::ServiceExt;

use test_helpers::{
    create_test_db, employee_row, employee_xlsx_bytes, open_shared, seed_references, valid_row,
    Cell,
};

const BOUNDARY: &str = "hris-test-boundary";
const BODY_LIMIT: usize = 10 * 1024 * 1024;

struct TestServer {
    router: Router,
    dir: TempDir,
    _db_file: tempfile::NamedTempFile,
}

fn test_server() -> TestServer {
    let (db_file, db_path) = create_test_db().unwrap();
    let conn = open_shared(&db_path).unwrap();
    seed_references(&conn).unwrap();
    let dir = TempDir::new().unwrap();

    let upload_dir = dir.path().to_string_lossy().to_string();
    let template = dir.path().join("template.xlsx").to_string_lossy().to_string();
    let settings = AppSettings::from_lookup(|key| match key {
        k if k == ENV_DB_PATH => Some(db_path.clone()),
        k if k == ENV_UPLOAD_DIR => Some(upload_dir.clone()),
        k if k == ENV_TEMPLATE_PATHS => Some(template.clone()),
        _ => None,
    });

    let state = AppState::from_connection(conn, &settings);
    TestServer {
        router: build_router(state, BODY_LIMIT),
        dir,
        _db_file: db_file,
    }
}

fn multipart_body(field: &str, file_name: &str, bytes: &[u8]) -> Body {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    Body::from(body)
}

fn upload_request(field: &str, file_name: &str, bytes: &[u8]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/hr/import/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(multipart_body(field, file_name, bytes))
        .unwrap()
}

fn confirm_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/hr/import/confirm")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_health() {
    let server = test_server();
    let response = server
        .router
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"ok");
}

#[tokio::test]
async fn test_upload_then_confirm_over_http() {
    hris_import::logging::init_test();
    println!("\n=== 测试 HTTP 上传 + 确认 ===\n");
    let server = test_server();

    let bytes = employee_xlsx_bytes(&[
        valid_row("120001", "intan@corp.co.id"),
        employee_row(&[
            ("Nama Lengkap", Cell::Text("Joko")),
            ("NIK", Cell::Text("120002")),
            ("Email Perusahaan", Cell::Text("joko@corp.co.id")),
            ("No. Handphone", Cell::Text("081234567891")),
            ("Divisi", Cell::Text("Divisi IT")),
        ]),
    ])
    .unwrap();

    // 步骤 1: 上传
    let (status, body) = send(&server.router, upload_request("file", "karyawan.xlsx", &bytes)).await;
    println!("✓ 上传响应: {}", body);

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "File processed successfully");
    assert_eq!(body["data"]["totalRows"], 2);
    assert_eq!(body["data"]["validRows"], 1);
    assert_eq!(body["data"]["invalidRows"], 1);
    assert_eq!(body["data"]["errors"][0]["row"], 3);
    assert_eq!(
        body["data"]["errors"][0]["errors"][0],
        "Divisi 'Divisi IT' tidak ditemukan"
    );
    let temp_file_path = body["data"]["tempFilePath"].as_str().unwrap().to_string();
    assert!(Path::new(&temp_file_path).is_file());

    // 步骤 2: 确认
    let (status, body) =
        send(&server.router, confirm_request(serde_json::json!({ "filePath": temp_file_path }))).await;
    println!("✓ 确认响应: {}", body);

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Import successful");
    assert_eq!(body["data"]["successCount"], 1);
    assert_eq!(body["data"]["data"][0]["nomorIndukKaryawan"], "120001");
    assert!(body["data"]["batchId"].is_string());

    // 步骤 3: 批次
    let (status, body) = send(
        &server.router,
        Request::builder()
            .uri("/api/hr/import/batches?limit=5")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["data"][0]["successRows"], 1);

    println!("\n=== 测试通过 ===\n");
}

#[tokio::test]
async fn test_upload_without_file_field() {
    let server = test_server();

    let (status, body) = send(&server.router, upload_request("document", "x.xlsx", b"abc")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "No file uploaded");
    assert_eq!(body["error"]["details"]["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_upload_corrupt_file_is_server_error_with_context() {
    let server = test_server();

    let (status, body) = send(&server.router, upload_request("file", "x.xlsx", b"not a zip")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Error processing file");
    assert_eq!(body["error"]["details"]["code"], "IMPORT_ERROR");
    assert!(body["error"]["message"].as_str().unwrap().contains("Excel"));
}

#[tokio::test]
async fn test_confirm_input_errors() {
    let server = test_server();

    let (status, body) = send(&server.router, confirm_request(serde_json::json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "File path is required");

    let (status, body) =
        send(&server.router, confirm_request(serde_json::json!({ "filePath": "import-none.xlsx" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["details"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_confirm_without_valid_rows() {
    let server = test_server();

    let bytes = employee_xlsx_bytes(&[employee_row(&[("NIK", Cell::Text("1"))])]).unwrap();
    let (_, body) = send(&server.router, upload_request("file", "x.xlsx", &bytes)).await;
    let temp_file_path = body["data"]["tempFilePath"].as_str().unwrap().to_string();

    let (status, body) =
        send(&server.router, confirm_request(serde_json::json!({ "filePath": temp_file_path }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Tidak ada data valid untuk diimport");
}

#[tokio::test]
async fn test_template_download() {
    let server = test_server();
    let template_request = || {
        Request::builder()
            .uri("/api/hr/import/template")
            .body(Body::empty())
            .unwrap()
    };

    let (status, body) = send(&server.router, template_request()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Template file not found");

    let template_bytes = employee_xlsx_bytes(&[]).unwrap();
    std::fs::write(server.dir.path().join("template.xlsx"), &template_bytes).unwrap();

    let response = server.router.clone().oneshot(template_request()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"Employee_Import_Template.xlsx\""
    );
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(bytes.len(), template_bytes.len());
}
