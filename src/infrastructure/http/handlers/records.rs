//! Record HTTP Handlers
//!
//! 把 axum 请求转换成 `ProxyRequest`，交给路由器处理，
//! 再把 `ProxyResponse` 原样写回（状态码、响应头、响应体）

use axum::{
    body::Body,
    extract::{Path, State},
    http::{HeaderName, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
};
use std::collections::HashMap;
use std::sync::Arc;

use crate::application::dispatch::ID_PATH_PARAMETER;
use crate::application::{ProxyRequest, ProxyResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 集合路径（不带 id）
pub async fn collection(
    State(state): State<Arc<AppState>>,
    method: Method,
    body: String,
) -> Result<Response, ApiError> {
    let request = ProxyRequest {
        http_method: method.as_str().to_string(),
        path_parameters: None,
        body: non_empty(body),
    };
    dispatch(&state, request).await
}

/// 单条记录路径（带 id）
pub async fn item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    method: Method,
    body: String,
) -> Result<Response, ApiError> {
    let mut path_parameters = HashMap::new();
    path_parameters.insert(ID_PATH_PARAMETER.to_string(), id);

    let request = ProxyRequest {
        http_method: method.as_str().to_string(),
        path_parameters: Some(path_parameters),
        body: non_empty(body),
    };
    dispatch(&state, request).await
}

async fn dispatch(state: &AppState, request: ProxyRequest) -> Result<Response, ApiError> {
    let response = state.router.handle(request).await?;
    Ok(into_http_response(response))
}

fn non_empty(body: String) -> Option<String> {
    if body.is_empty() {
        None
    } else {
        Some(body)
    }
}

/// 将 `ProxyResponse` 写成 HTTP 响应
pub fn into_http_response(proxy: ProxyResponse) -> Response {
    let status = StatusCode::from_u16(proxy.status_code).unwrap_or_else(|_| {
        tracing::warn!(status_code = proxy.status_code, "Invalid status code in response");
        StatusCode::INTERNAL_SERVER_ERROR
    });

    let mut response = (status, Body::from(proxy.body)).into_response();
    let headers = response.headers_mut();

    for (name, value) in &proxy.headers {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                headers.insert(name, value);
            }
            _ => tracing::warn!(header = %name, "Skipping invalid response header"),
        }
    }

    response
}
