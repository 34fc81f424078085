//! HTTP Layer - 宿主 HTTP 边界
//!
//! 把 axum 请求适配为 `ProxyRequest`，并把路由器的 `ProxyResponse` 写回

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use routes::create_routes;
pub use server::{HttpServer, ServerConfig};
pub use state::AppState;
