//! Record Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::RecordStorePort;
use crate::application::queries::{GetRecord, ListRecords};
use crate::domain::record::Record;

/// GetRecord Handler
pub struct GetRecordHandler {
    store: Arc<dyn RecordStorePort>,
}

impl GetRecordHandler {
    pub fn new(store: Arc<dyn RecordStorePort>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: GetRecord) -> Result<Option<Record>, ApplicationError> {
        self.store.get(&query.key).await.map_err(|e| {
            tracing::error!(key = %query.key, error = %e, "Failed to get record");
            e.into()
        })
    }
}

/// ListRecords Handler
pub struct ListRecordsHandler {
    store: Arc<dyn RecordStorePort>,
}

impl ListRecordsHandler {
    pub fn new(store: Arc<dyn RecordStorePort>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, _query: ListRecords) -> Result<Vec<Record>, ApplicationError> {
        let records = self.store.scan().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to scan records");
            ApplicationError::from(e)
        })?;

        tracing::debug!(count = records.len(), "Records scanned");

        Ok(records)
    }
}
