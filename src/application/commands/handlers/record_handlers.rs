//! Record Command Handlers

use serde_json::{Map, Value};
use std::sync::Arc;

use crate::application::commands::{DeleteRecord, SaveRecord, UpdateRecord};
use crate::application::error::ApplicationError;
use crate::application::ports::RecordStorePort;
use crate::domain::record::Record;

// ============================================================================
// SaveRecord
// ============================================================================

/// SaveRecord Handler
pub struct SaveRecordHandler {
    store: Arc<dyn RecordStorePort>,
}

impl SaveRecordHandler {
    pub fn new(store: Arc<dyn RecordStorePort>) -> Self {
        Self { store }
    }

    /// 写入记录并原样返回调用方传入的记录（不回读存储）
    pub async fn handle(&self, command: SaveRecord) -> Result<Record, ApplicationError> {
        if let Err(e) = self.store.put(&command.record).await {
            tracing::error!(error = %e, "Failed to save record");
            return Err(e.into());
        }

        tracing::info!(
            key = ?command.record.get("id"),
            attributes = command.record.attributes().len(),
            "Record saved"
        );

        Ok(command.record)
    }
}

// ============================================================================
// UpdateRecord
// ============================================================================

/// UpdateRecord Handler
pub struct UpdateRecordHandler {
    store: Arc<dyn RecordStorePort>,
}

impl UpdateRecordHandler {
    pub fn new(store: Arc<dyn RecordStorePort>) -> Self {
        Self { store }
    }

    /// 返回存储层报告的更新后属性
    pub async fn handle(
        &self,
        command: UpdateRecord,
    ) -> Result<Map<String, Value>, ApplicationError> {
        let updated = self
            .store
            .update_attribute(&command.key, &command.expression)
            .await
            .map_err(|e| {
                tracing::error!(key = %command.key, error = %e, "Failed to update record");
                e
            })?;

        tracing::info!(
            key = %command.key,
            expression = %command.expression.expression(),
            "Record updated"
        );

        Ok(updated)
    }
}

// ============================================================================
// DeleteRecord
// ============================================================================

/// DeleteRecord Handler
pub struct DeleteRecordHandler {
    store: Arc<dyn RecordStorePort>,
}

impl DeleteRecordHandler {
    pub fn new(store: Arc<dyn RecordStorePort>) -> Self {
        Self { store }
    }

    /// 删除记录并返回删除前的值；记录不存在不算错误
    ///
    /// 存储错误直接向上抛出，不在这里记录日志
    pub async fn handle(&self, command: DeleteRecord) -> Result<Option<Record>, ApplicationError> {
        let prior = self.store.delete(&command.key).await?;

        tracing::info!(
            key = %command.key,
            existed = prior.is_some(),
            "Record deleted"
        );

        Ok(prior)
    }
}
