use axum::Json;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;

use crate::cache::operations::{StoreError, reset::ResetError};

#[derive(Debug)]
pub enum AppError {
    Unauthorized,
    Forbidden,
    StoreUnavailable(String),
    PartialReset { deleted: u64, detail: String },
}

#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "未授权访问".to_string(), None),
            AppError::Forbidden => (StatusCode::FORBIDDEN, "需要管理员权限".to_string(), None),
            AppError::StoreUnavailable(detail) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "缓存服务不可用".to_string(),
                Some(json!({ "detail": detail })),
            ),
            AppError::PartialReset { deleted, detail } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "速率限制仅部分清除".to_string(),
                Some(json!({ "deleted": deleted, "detail": detail })),
            ),
        };

        let body = Json(ErrorResponse {
            success: false,
            error,
            details,
        });

        (status, body).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::StoreUnavailable(err.to_string())
    }
}

impl From<ResetError> for AppError {
    fn from(err: ResetError) -> Self {
        match err {
            ResetError::Store(e) => AppError::StoreUnavailable(e.to_string()),
            ResetError::Partial { deleted, source } => AppError::PartialReset {
                deleted,
                detail: source.to_string(),
            },
        }
    }
}
