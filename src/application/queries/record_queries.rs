//! Record Queries

use crate::domain::record::RecordKey;

/// 按主键获取记录
#[derive(Debug, Clone)]
pub struct GetRecord {
    pub key: RecordKey,
}

/// 列出所有记录（第一页）
#[derive(Debug, Clone)]
pub struct ListRecords;
