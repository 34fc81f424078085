//! Record Context - Errors

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("记录缺少主键属性 `id`")]
    MissingKey,

    #[error("无效的主键类型: {0}（仅支持字符串或数字）")]
    InvalidKey(String),

    #[error("更新属性名不能为空")]
    EmptyAttributeName,

    #[error("不能更新主键属性: {0}")]
    KeyAttributeUpdate(String),

    #[error("更新表达式占位符未绑定: {0}")]
    UnboundPlaceholder(String),
}
