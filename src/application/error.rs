//! 应用层错误定义
//!
//! 统一的命令/查询错误类型。路由器只负责记录并向上抛出，
//! 不会把错误转换成结构化的响应体。

use thiserror::Error;

use crate::application::ports::StorageError;
use crate::domain::record::RecordError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 存储服务错误（连接、限流、非法主键等）
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// 请求体无法解析
    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    /// 请求中的主键或更新参数无效
    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] RecordError),
}

impl ApplicationError {
    /// 创建请求体解析错误
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedBody(message.into())
    }
}

impl From<serde_json::Error> for ApplicationError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedBody(err.to_string())
    }
}
