//! HTTP Routes
//!
//! API Endpoints:
//! - {resource}          ANY   记录集合（POST 保存 / GET 全表 / PUT 更新 / DELETE 删除）
//! - {resource}/:id      ANY   单条记录（GET 读取；其他方法同上，路径 id 只用于 GET）
//! - /invoke             POST  直接提交代理事件 JSON，返回代理响应 JSON
//! - /ping               GET   健康检查
//!
//! `{resource}` 默认为 `/users`

use axum::{
    routing::{any, get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes(resource_path: &str) -> Router<Arc<AppState>> {
    let resource_path = resource_path.trim_end_matches('/');

    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/invoke", post(handlers::invoke))
        .route(resource_path, any(handlers::collection))
        .route(&format!("{}/:id", resource_path), any(handlers::item))
}
