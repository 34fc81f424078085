//! Application State
//!
//! 持有由注入的记录存储句柄构造的请求路由器

use std::sync::Arc;

use crate::application::{RecordStorePort, RequestRouter, RouterConfig};

/// 应用状态
///
/// 存储句柄在进程启动时创建，生命周期与 HTTP 服务器相同
pub struct AppState {
    pub router: RequestRouter,
}

impl AppState {
    /// 创建应用状态
    pub fn new(store: Arc<dyn RecordStorePort>, router_config: RouterConfig) -> Self {
        Self {
            router: RequestRouter::new(store, router_config),
        }
    }
}
