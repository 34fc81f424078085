//! Invoke Handler
//!
//! 直接接收代理事件 JSON（`httpMethod`、`pathParameters`、`body`），
//! 返回代理响应 JSON（`statusCode`、`headers`、`body`）

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::{ProxyRequest, ProxyResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 处理一次代理事件
pub async fn invoke(
    State(state): State<Arc<AppState>>,
    Json(event): Json<ProxyRequest>,
) -> Result<Json<ProxyResponse>, ApiError> {
    tracing::debug!(
        method = %event.http_method,
        has_id = event.path_id().is_some(),
        "Invoking router with proxy event"
    );

    let response = state.router.handle(event).await?;
    Ok(Json(response))
}
