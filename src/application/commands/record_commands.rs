//! Record Commands

use crate::domain::record::{Record, RecordKey, UpdateExpression};

/// 保存记录命令（无条件覆盖）
#[derive(Debug, Clone)]
pub struct SaveRecord {
    pub record: Record,
}

/// 单属性更新命令
#[derive(Debug, Clone)]
pub struct UpdateRecord {
    pub key: RecordKey,
    pub expression: UpdateExpression,
}

/// 删除记录命令
#[derive(Debug, Clone)]
pub struct DeleteRecord {
    pub key: RecordKey,
}
