//! Record Store Port - 记录存储
//!
//! 定义 key-value 表的抽象接口，具体实现在 infrastructure 层
//! （Sled、SQLite、内存）

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::record::{Record, RecordError, RecordKey, UpdateExpression};

/// Record Store 错误
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    #[error("Invalid record: {0}")]
    Record(#[from] RecordError),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::SerializationError(err.to_string())
    }
}

/// Record Store Port
///
/// 每个方法对应存储服务的一次调用，不做重试、不加锁。
/// 并发写同一主键时以最后一次写入为准。
#[async_trait]
pub trait RecordStorePort: Send + Sync {
    /// 根据主键读取记录
    async fn get(&self, key: &RecordKey) -> Result<Option<Record>, StorageError>;

    /// 全表扫描，只返回第一页（不处理分页）
    async fn scan(&self) -> Result<Vec<Record>, StorageError>;

    /// 无条件写入（存在则覆盖）
    ///
    /// 记录必须带有标量 `id`
    async fn put(&self, record: &Record) -> Result<(), StorageError>;

    /// 单属性更新，返回更新后的属性
    ///
    /// 记录不存在时返回 `ItemNotFound`，不会隐式创建
    async fn update_attribute(
        &self,
        key: &RecordKey,
        expression: &UpdateExpression,
    ) -> Result<Map<String, Value>, StorageError>;

    /// 删除记录，返回删除前的值
    async fn delete(&self, key: &RecordKey) -> Result<Option<Record>, StorageError>;
}
