//! In-Memory Record Store Implementation

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::{Map, Value};

use crate::application::ports::{RecordStorePort, StorageError};
use crate::domain::record::{Record, RecordKey, UpdateExpression};

/// 默认扫描页大小
const DEFAULT_SCAN_LIMIT: usize = 1000;

/// 内存记录存储
///
/// 进程内存储，用于测试和临时运行；扫描顺序不保证
pub struct InMemoryRecordStore {
    records: DashMap<String, Record>,
    scan_limit: usize,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::with_scan_limit(DEFAULT_SCAN_LIMIT)
    }

    pub fn with_scan_limit(scan_limit: usize) -> Self {
        Self {
            records: DashMap::new(),
            scan_limit,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStorePort for InMemoryRecordStore {
    async fn get(&self, key: &RecordKey) -> Result<Option<Record>, StorageError> {
        Ok(self.records.get(&key.storage_key()).map(|r| r.clone()))
    }

    async fn scan(&self) -> Result<Vec<Record>, StorageError> {
        Ok(self
            .records
            .iter()
            .take(self.scan_limit)
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn put(&self, record: &Record) -> Result<(), StorageError> {
        let key = record.key()?;
        self.records.insert(key.storage_key(), record.clone());
        tracing::debug!(key = %key, "Record stored in memory");
        Ok(())
    }

    async fn update_attribute(
        &self,
        key: &RecordKey,
        expression: &UpdateExpression,
    ) -> Result<Map<String, Value>, StorageError> {
        let mut record = self
            .records
            .get_mut(&key.storage_key())
            .ok_or_else(|| StorageError::ItemNotFound(key.to_string()))?;
        Ok(expression.apply(&mut record)?)
    }

    async fn delete(&self, key: &RecordKey) -> Result<Option<Record>, StorageError> {
        Ok(self.records.remove(&key.storage_key()).map(|(_, record)| record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn test_record_lifecycle() {
        let store = InMemoryRecordStore::new();
        let key = RecordKey::from_path("u1");

        // Put
        store
            .put(&record(json!({"id": "u1", "name": "Ann"})))
            .await
            .unwrap();
        assert_eq!(store.len(), 1);

        // Update
        let expression = UpdateExpression::set("name", json!("Anna")).unwrap();
        let updated = store.update_attribute(&key, &expression).await.unwrap();
        assert_eq!(Value::Object(updated), json!({"name": "Anna"}));

        // Get
        let found = store.get(&key).await.unwrap().unwrap();
        assert_eq!(found.into_value(), json!({"id": "u1", "name": "Anna"}));

        // Delete
        let prior = store.delete(&key).await.unwrap();
        assert!(prior.is_some());
        assert!(store.get(&key).await.unwrap().is_none());
        assert!(store.delete(&key).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_integral_number_forms_address_one_record() {
        let store = InMemoryRecordStore::new();
        store
            .put(&record(json!({"id": 1.0, "name": "Ann"})))
            .await
            .unwrap();

        let int_key = RecordKey::from_value(&json!(1)).unwrap();
        let exponent_key = RecordKey::from_value(&serde_json::from_str("1e0").unwrap()).unwrap();

        let expression = UpdateExpression::set("name", json!("Anna")).unwrap();
        store.update_attribute(&exponent_key, &expression).await.unwrap();

        let prior = store.delete(&int_key).await.unwrap().unwrap();
        assert_eq!(prior.get("name"), Some(&json!("Anna")));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_put_requires_key() {
        let store = InMemoryRecordStore::new();
        let result = store.put(&record(json!({"name": "Ann"}))).await;
        assert!(matches!(result, Err(StorageError::Record(_))));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_update_does_not_create() {
        let store = InMemoryRecordStore::new();
        let expression = UpdateExpression::set("name", json!("x")).unwrap();
        let result = store
            .update_attribute(&RecordKey::from_path("ghost"), &expression)
            .await;
        assert!(matches!(result, Err(StorageError::ItemNotFound(_))));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_scan_truncates_to_first_page() {
        let store = InMemoryRecordStore::with_scan_limit(2);
        for i in 0..5 {
            store.put(&record(json!({"id": i}))).await.unwrap();
        }
        assert_eq!(store.scan().await.unwrap().len(), 2);
    }
}
