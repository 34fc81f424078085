//! 应用层 - 查询（读操作）
//!
//! CQRS 查询侧：单条读取与全表扫描

mod record_queries;

pub mod handlers;

pub use record_queries::*;
