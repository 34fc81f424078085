//! Infrastructure Layer - 基础设施层
//!
//! 提供所有端口的具体实现以及 HTTP 边界

pub mod http;
pub mod memory;
pub mod persistence;

pub use memory::InMemoryRecordStore;
pub use persistence::{SledRecordStore, SqliteRecordStore};
