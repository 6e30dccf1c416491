// ==========================================
// 人事系统 - HTTP 服务主入口
// ==========================================
// 技术栈: axum + Rust + SQLite
// 配置: 环境变量（HRIS_DB_PATH / HRIS_UPLOAD_DIR / HRIS_BIND_ADDR / ...）
// ==========================================

use anyhow::Context;
use hris_import::app::{build_router, AppState};
use hris_import::config::AppSettings;
use hris_import::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", hris_import::APP_NAME);
    tracing::info!("系统版本: {}", hris_import::VERSION);
    tracing::info!("==================================================");

    let settings = AppSettings::from_env();
    tracing::info!(
        db_path = %settings.db_path,
        import_dir = %settings.import_dir().display(),
        "加载配置完成"
    );

    let state = AppState::new(&settings).map_err(anyhow::Error::msg)?;
    let app = build_router(state, settings.max_upload_bytes);

    let listener = tokio::net::TcpListener::bind(&settings.bind_addr)
        .await
        .with_context(|| format!("无法监听地址: {}", settings.bind_addr))?;
    tracing::info!("HTTP 服务已启动: {}", settings.bind_addr);

    axum::serve(listener, app).await.context("HTTP 服务异常退出")?;
    Ok(())
}
