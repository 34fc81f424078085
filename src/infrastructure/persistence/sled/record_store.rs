//! Sled-based Record Store Implementation

use async_trait::async_trait;
use serde_json::{Map, Value};
use sled::transaction::{
    ConflictableTransactionError, ConflictableTransactionResult, TransactionError,
};
use sled::{Db, IVec, Tree};
use std::path::Path;

use crate::application::ports::{RecordStorePort, StorageError};
use crate::domain::record::{Record, RecordKey, UpdateExpression};

/// Sled 存储配置
#[derive(Debug, Clone)]
pub struct SledStoreConfig {
    /// 数据库路径
    pub db_path: String,
    /// 表名（对应一个 sled Tree）
    pub table: String,
    /// 单次扫描最多返回的记录数
    pub scan_limit: usize,
}

impl Default for SledStoreConfig {
    fn default() -> Self {
        Self {
            db_path: "data/usertable.sled".to_string(),
            table: "users".to_string(),
            scan_limit: 1000,
        }
    }
}

/// Sled 记录存储
///
/// 主键为 `id` 的规范 JSON 编码，值为记录的 JSON 字节
pub struct SledRecordStore {
    db: Db,
    tree: Tree,
    scan_limit: usize,
}

impl SledRecordStore {
    /// 创建新的存储实例
    pub fn new(config: &SledStoreConfig) -> Result<Self, StorageError> {
        let db = sled::open(&config.db_path)
            .map_err(|e| StorageError::DatabaseError(e.to_string()))?;
        let tree = db
            .open_tree(&config.table)
            .map_err(|e| StorageError::DatabaseError(e.to_string()))?;

        tracing::info!(
            db_path = %config.db_path,
            table = %config.table,
            records = tree.len(),
            scan_limit = config.scan_limit,
            "SledRecordStore initialized"
        );

        Ok(Self {
            db,
            tree,
            scan_limit: config.scan_limit,
        })
    }

    /// 打开现有数据库中的表
    pub fn open<P: AsRef<Path>>(path: P, table: &str) -> Result<Self, StorageError> {
        let config = SledStoreConfig {
            db_path: path.as_ref().to_string_lossy().to_string(),
            table: table.to_string(),
            ..Default::default()
        };
        Self::new(&config)
    }

    /// 刷新数据库
    pub fn flush(&self) -> Result<(), StorageError> {
        self.db
            .flush()
            .map_err(|e| StorageError::DatabaseError(e.to_string()))?;
        Ok(())
    }

    fn decode(bytes: &IVec) -> Result<Record, StorageError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

fn abort(err: impl Into<StorageError>) -> ConflictableTransactionError<StorageError> {
    ConflictableTransactionError::Abort(err.into())
}

#[async_trait]
impl RecordStorePort for SledRecordStore {
    async fn get(&self, key: &RecordKey) -> Result<Option<Record>, StorageError> {
        self.tree
            .get(key.storage_key())
            .map_err(|e| StorageError::DatabaseError(e.to_string()))?
            .map(|bytes| Self::decode(&bytes))
            .transpose()
    }

    async fn scan(&self) -> Result<Vec<Record>, StorageError> {
        let mut records = Vec::new();
        for item in self.tree.iter().take(self.scan_limit) {
            let (_, value) = item.map_err(|e| StorageError::DatabaseError(e.to_string()))?;
            records.push(Self::decode(&value)?);
        }
        Ok(records)
    }

    async fn put(&self, record: &Record) -> Result<(), StorageError> {
        let key = record.key()?;
        let bytes = serde_json::to_vec(record)?;

        self.tree
            .insert(key.storage_key(), bytes)
            .map_err(|e| StorageError::DatabaseError(e.to_string()))?;

        tracing::debug!(key = %key, "Record stored");

        Ok(())
    }

    async fn update_attribute(
        &self,
        key: &RecordKey,
        expression: &UpdateExpression,
    ) -> Result<Map<String, Value>, StorageError> {
        let storage_key = key.storage_key();

        // 读取-修改-写入在同一个事务中完成
        let result = self.tree.transaction(
            |tx| -> ConflictableTransactionResult<Map<String, Value>, StorageError> {
                let current = tx
                    .get(storage_key.as_bytes())?
                    .ok_or_else(|| abort(StorageError::ItemNotFound(key.to_string())))?;

                let mut record: Record = serde_json::from_slice(&current).map_err(abort)?;
                let updated = expression.apply(&mut record).map_err(abort)?;
                let bytes = serde_json::to_vec(&record).map_err(abort)?;

                tx.insert(storage_key.as_bytes(), bytes)?;
                Ok(updated)
            },
        );

        match result {
            Ok(updated) => Ok(updated),
            Err(TransactionError::Abort(e)) => Err(e),
            Err(TransactionError::Storage(e)) => Err(StorageError::DatabaseError(e.to_string())),
        }
    }

    async fn delete(&self, key: &RecordKey) -> Result<Option<Record>, StorageError> {
        self.tree
            .remove(key.storage_key())
            .map_err(|e| StorageError::DatabaseError(e.to_string()))?
            .map(|bytes| Self::decode(&bytes))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn record(value: Value) -> Record {
        serde_json::from_value(value).unwrap()
    }

    fn config(dir: &tempfile::TempDir) -> SledStoreConfig {
        SledStoreConfig {
            db_path: dir.path().join("test.sled").to_string_lossy().to_string(),
            table: "users".to_string(),
            scan_limit: 100,
        }
    }

    #[tokio::test]
    async fn test_put_get_delete() {
        let dir = tempdir().unwrap();
        let store = SledRecordStore::new(&config(&dir)).unwrap();
        let key = RecordKey::from_path("u1");

        // Put
        store
            .put(&record(json!({"id": "u1", "name": "Ann"})))
            .await
            .unwrap();

        // Get
        let found = store.get(&key).await.unwrap();
        assert_eq!(found, Some(record(json!({"id": "u1", "name": "Ann"}))));

        // Delete
        let prior = store.delete(&key).await.unwrap();
        assert_eq!(prior, Some(record(json!({"id": "u1", "name": "Ann"}))));
        assert!(store.get(&key).await.unwrap().is_none());
        assert!(store.delete(&key).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_integral_number_forms_share_a_key() {
        let dir = tempdir().unwrap();
        let store = SledRecordStore::new(&config(&dir)).unwrap();
        store
            .put(&record(json!({"id": 1.0, "name": "Ann"})))
            .await
            .unwrap();

        for id in ["1", "1.0", "1e0"] {
            let key = RecordKey::from_value(&serde_json::from_str(id).unwrap()).unwrap();
            assert!(store.get(&key).await.unwrap().is_some(), "lookup by {}", id);
        }

        let prior = store
            .delete(&RecordKey::from_value(&json!(1)).unwrap())
            .await
            .unwrap();
        assert!(prior.is_some());
        assert!(store.scan().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_attribute() {
        let dir = tempdir().unwrap();
        let store = SledRecordStore::new(&config(&dir)).unwrap();
        let key = RecordKey::from_path("u1");

        store
            .put(&record(json!({"id": "u1", "name": "Ann", "age": 30})))
            .await
            .unwrap();

        let expression = UpdateExpression::set("name", json!("Anna")).unwrap();
        let updated = store.update_attribute(&key, &expression).await.unwrap();
        assert_eq!(Value::Object(updated), json!({"name": "Anna"}));

        let found = store.get(&key).await.unwrap().unwrap();
        assert_eq!(found.into_value(), json!({"id": "u1", "name": "Anna", "age": 30}));

        let missing = store
            .update_attribute(&RecordKey::from_path("ghost"), &expression)
            .await;
        assert!(matches!(missing, Err(StorageError::ItemNotFound(_))));
        assert!(store
            .get(&RecordKey::from_path("ghost"))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_scan_returns_first_page_only() {
        let dir = tempdir().unwrap();
        let mut cfg = config(&dir);
        cfg.scan_limit = 3;

        let store = SledRecordStore::new(&cfg).unwrap();
        assert!(store.scan().await.unwrap().is_empty());

        for i in 0..5 {
            store.put(&record(json!({"id": i}))).await.unwrap();
        }
        assert_eq!(store.scan().await.unwrap().len(), 3);

        let found = store
            .get(&RecordKey::from_value(&json!(4)).unwrap())
            .await
            .unwrap();
        assert_eq!(found, Some(record(json!({"id": 4}))));
        store.flush().unwrap();
    }

    #[tokio::test]
    async fn test_tables_are_isolated() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("shared.sled");
        let users = SledRecordStore::open(&path, "users").unwrap();
        users.put(&record(json!({"id": "u1"}))).await.unwrap();

        let other = users.db.open_tree("orders").unwrap();
        assert!(other.is_empty());
        assert_eq!(users.scan().await.unwrap().len(), 1);
    }
}
