use crate::api::error::ApiError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

// ==========================================
// 公共工具：响应信封、错误映射
// ==========================================

/// 统一响应信封
#[derive(Debug, Serialize)]
pub(super) struct Envelope<T: Serialize> {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

/// 错误详情（返回给前端）
#[derive(Debug, Serialize)]
pub(super) struct ErrorBody {
    /// 错误消息
    pub message: String,

    /// 详细信息（错误代码）
    pub details: serde_json::Value,
}

/// 成功响应
pub(super) fn ok<T: Serialize>(data: T, message: Option<&str>) -> Response {
    let body = Envelope {
        success: true,
        data: Some(data),
        message: message.map(str::to_string),
        error: None,
    };
    (StatusCode::OK, Json(body)).into_response()
}

/// ApiError → HTTP 状态码
pub(super) fn status_of(err: &ApiError) -> StatusCode {
    match err {
        ApiError::InvalidInput(_) | ApiError::BusinessRuleViolation(_) => StatusCode::BAD_REQUEST,
        ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        ApiError::ImportError(_)
        | ApiError::DatabaseError(_)
        | ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// 路由层错误：ApiError + 可选的上下文说明（服务端错误时作为顶层 message）
#[derive(Debug)]
pub(super) struct HttpError {
    err: ApiError,
    context: Option<&'static str>,
}

impl HttpError {
    pub fn with_context(context: &'static str) -> impl FnOnce(ApiError) -> HttpError {
        move |err| HttpError {
            err,
            context: Some(context),
        }
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        HttpError { err, context: None }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = status_of(&self.err);
        let detail = self.err.message();

        if status.is_server_error() {
            tracing::error!(code = self.err.code(), error = %self.err, "请求处理失败");
        } else {
            tracing::warn!(code = self.err.code(), error = %self.err, "请求被拒绝");
        }

        // 客户端错误直接展示原因；服务端错误展示上下文，原因放在 error.message
        let message = match self.context {
            Some(context) if status.is_server_error() => context.to_string(),
            _ => detail.clone(),
        };

        let body: Envelope<()> = Envelope {
            success: false,
            data: None,
            message: Some(message),
            error: Some(ErrorBody {
                message: detail,
                details: serde_json::json!({ "code": self.err.code() }),
            }),
        };
        (status, Json(body)).into_response()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        HttpError::from(self).into_response()
    }
}

pub(super) type HttpResult = Result<Response, HttpError>;
