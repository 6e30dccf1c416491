// ==========================================
// 人事系统 - HTTP 路由
// ==========================================
// 职责: 将 API 层暴露为 HTTP 接口（axum）
// 响应信封: { success, data?, message?, error?: { message, details } }
// ==========================================

mod common;
mod import;

pub use import::TEMPLATE_DOWNLOAD_NAME;

use crate::app::state::AppState;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// 构建完整路由
///
/// # 参数
/// - state: 应用状态
/// - max_upload_bytes: 请求体上限（上传文件大小限制）
pub fn build_router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/hr/import", import::routes())
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
