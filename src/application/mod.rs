//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（RecordStore）
//! - commands: CQRS 命令及处理器（保存、更新、删除）
//! - queries: CQRS 查询及处理器（单条读取、全表扫描）
//! - dispatch: 请求路由器，把 HTTP 请求描述分发到命令/查询并构造响应
//! - error: 应用层错误定义

pub mod commands;
pub mod dispatch;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    handlers::{DeleteRecordHandler, SaveRecordHandler, UpdateRecordHandler},
    DeleteRecord, SaveRecord, UpdateRecord,
};

pub use dispatch::{Envelope, Operation, ProxyRequest, ProxyResponse, RequestRouter, RouterConfig};

pub use error::ApplicationError;

pub use ports::{RecordStorePort, StorageError};

pub use queries::{
    handlers::{GetRecordHandler, ListRecordsHandler},
    GetRecord, ListRecords,
};
