//! HTTP Middleware
//!
//! 按状态码分级记录每个请求：5xx 为 error，4xx 为 warn，其余为 debug。
//! 路由器的 404 兜底和边界的 502 默认失败响应都会在这里留下日志。

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

pub async fn error_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    match status {
        500..=599 => tracing::error!(%method, %uri, status, elapsed_ms, "Request failed"),
        400..=499 => tracing::warn!(%method, %uri, status, elapsed_ms, "Request rejected"),
        _ => tracing::debug!(%method, %uri, status, elapsed_ms, "Request completed"),
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::RouterConfig;
    use crate::infrastructure::http::{create_routes, AppState};
    use crate::infrastructure::memory::InMemoryRecordStore;
    use axum::{
        body::{to_bytes, Body},
        http::{Method, Request as HttpRequest, StatusCode},
        Router,
    };
    use std::sync::Arc;
    use tower::util::ServiceExt;

    fn app() -> Router {
        let state = AppState::new(
            Arc::new(InMemoryRecordStore::new()),
            RouterConfig::default(),
        );
        create_routes("/users")
            .layer(axum::middleware::from_fn(error_logging_middleware))
            .with_state(Arc::new(state))
    }

    fn request(method: Method, body: &str) -> HttpRequest<Body> {
        HttpRequest::builder()
            .method(method)
            .uri("/users")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_scan_passes_through() {
        let response = app().oneshot(request(Method::GET, "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unrecognized_method_keeps_fallback_body() {
        let response = app().oneshot(request(Method::PATCH, "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], br#""404 Not found, try another route""#);
    }

    #[tokio::test]
    async fn test_failed_update_keeps_bad_gateway_body() {
        let response = app()
            .oneshot(request(
                Method::PUT,
                r#"{"id":"ghost","updateKey":"name","updateValue":"x"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], br#"{"message":"Internal server error"}"#);
    }
}
