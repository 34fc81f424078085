//! HTTP Error Handling
//!
//! 路由器不会把错误转换成结构化响应；未处理的错误在这里统一变成
//! 宿主边界的默认失败响应（502 + `{"message": "Internal server error"}`）

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::ApplicationError;

/// 默认失败响应体
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    /// 路由器抛出的未处理错误
    Unhandled(ApplicationError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Unhandled(e) => {
                let kind = match e {
                    ApplicationError::Storage(_) => "storage",
                    ApplicationError::MalformedBody(_) => "malformed_body",
                    ApplicationError::InvalidRequest(_) => "invalid_request",
                };
                tracing::error!(kind = kind, error = %e, "Unhandled request error");
            }
        }

        (
            StatusCode::BAD_GATEWAY,
            Json(ErrorResponse::new(INTERNAL_ERROR_MESSAGE)),
        )
            .into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(e: ApplicationError) -> Self {
        ApiError::Unhandled(e)
    }
}
