//! usertable - HTTP 到 key-value 表的单条记录 CRUD 服务
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Record Context: 记录、主键、参数化更新表达式
//!
//! 应用层 (application/):
//! - Ports: RecordStore 端口
//! - Commands / Queries: CQRS 处理器
//! - Dispatch: 请求路由器（方法分发 + 响应构造）
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: axum 边界（资源路由、代理事件入口、健康检查）
//! - Persistence: Sled / SQLite 记录存储
//! - Memory: 内存记录存储

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
