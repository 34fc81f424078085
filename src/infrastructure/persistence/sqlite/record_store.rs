//! SQLite Record Store

use async_trait::async_trait;
use serde_json::{Map, Value};

use super::{is_valid_table_name, DbPool};
use crate::application::ports::{RecordStorePort, StorageError};
use crate::domain::record::{Record, RecordKey, UpdateExpression};

/// 预先拼好的 SQL（表名已校验）
#[derive(Debug, Clone)]
struct Statements {
    get: String,
    scan: String,
    upsert: String,
    replace: String,
    delete: String,
}

impl Statements {
    fn for_table(table: &str) -> Self {
        Self {
            get: format!("SELECT item FROM {} WHERE id = ?", table),
            scan: format!("SELECT item FROM {} ORDER BY rowid LIMIT ?", table),
            upsert: format!(
                "INSERT INTO {} (id, item) VALUES (?, ?) \
                 ON CONFLICT(id) DO UPDATE SET item = excluded.item",
                table
            ),
            replace: format!("UPDATE {} SET item = ? WHERE id = ?", table),
            delete: format!("DELETE FROM {} WHERE id = ? RETURNING item", table),
        }
    }
}

/// SQLite Record Store
pub struct SqliteRecordStore {
    pool: DbPool,
    sql: Statements,
    scan_limit: usize,
}

impl SqliteRecordStore {
    pub fn new(pool: DbPool, table: &str, scan_limit: usize) -> Result<Self, StorageError> {
        if !is_valid_table_name(table) {
            return Err(StorageError::DatabaseError(format!(
                "invalid table name: {}",
                table
            )));
        }

        Ok(Self {
            pool,
            sql: Statements::for_table(table),
            scan_limit,
        })
    }
}

fn db_err(e: sqlx::Error) -> StorageError {
    StorageError::DatabaseError(e.to_string())
}

#[async_trait]
impl RecordStorePort for SqliteRecordStore {
    async fn get(&self, key: &RecordKey) -> Result<Option<Record>, StorageError> {
        let item: Option<String> = sqlx::query_scalar(&self.sql.get)
            .bind(key.storage_key())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;

        Ok(item.map(|s| serde_json::from_str(&s)).transpose()?)
    }

    async fn scan(&self) -> Result<Vec<Record>, StorageError> {
        let items: Vec<String> = sqlx::query_scalar(&self.sql.scan)
            .bind(self.scan_limit as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;

        items
            .iter()
            .map(|s| serde_json::from_str(s).map_err(StorageError::from))
            .collect()
    }

    async fn put(&self, record: &Record) -> Result<(), StorageError> {
        let key = record.key()?;

        sqlx::query(&self.sql.upsert)
            .bind(key.storage_key())
            .bind(serde_json::to_string(record)?)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        tracing::debug!(key = %key, "Record stored");

        Ok(())
    }

    async fn update_attribute(
        &self,
        key: &RecordKey,
        expression: &UpdateExpression,
    ) -> Result<Map<String, Value>, StorageError> {
        let storage_key = key.storage_key();
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        let item: Option<String> = sqlx::query_scalar(&self.sql.get)
            .bind(&storage_key)
            .fetch_optional(&mut *tx)
            .await
            .map_err(db_err)?;
        let item = item.ok_or_else(|| StorageError::ItemNotFound(key.to_string()))?;

        let mut record: Record = serde_json::from_str(&item)?;
        let updated = expression.apply(&mut record)?;

        sqlx::query(&self.sql.replace)
            .bind(serde_json::to_string(&record)?)
            .bind(&storage_key)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;

        tx.commit().await.map_err(db_err)?;

        Ok(updated)
    }

    async fn delete(&self, key: &RecordKey) -> Result<Option<Record>, StorageError> {
        let item: Option<String> = sqlx::query_scalar(&self.sql.delete)
            .bind(key.storage_key())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;

        Ok(item.map(|s| serde_json::from_str(&s)).transpose()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::sqlite::{create_pool, run_migrations, DatabaseConfig};
    use serde_json::json;

    async fn store(scan_limit: usize) -> SqliteRecordStore {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool, "users").await.unwrap();
        SqliteRecordStore::new(pool, "users", scan_limit).unwrap()
    }

    fn record(value: Value) -> Record {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn test_put_get_delete() {
        let store = store(100).await;
        let key = RecordKey::from_path("u1");

        store
            .put(&record(json!({"id": "u1", "name": "Ann"})))
            .await
            .unwrap();
        // 覆盖写
        store
            .put(&record(json!({"id": "u1", "name": "Zed"})))
            .await
            .unwrap();

        let found = store.get(&key).await.unwrap();
        assert_eq!(found, Some(record(json!({"id": "u1", "name": "Zed"}))));

        let prior = store.delete(&key).await.unwrap();
        assert_eq!(prior, Some(record(json!({"id": "u1", "name": "Zed"}))));
        assert!(store.get(&key).await.unwrap().is_none());
        assert!(store.delete(&key).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_attribute() {
        let store = store(100).await;
        let key = RecordKey::from_path("u1");
        store
            .put(&record(json!({"id": "u1", "name": "Ann", "age": 30})))
            .await
            .unwrap();

        let expression = UpdateExpression::set("age", json!(31)).unwrap();
        let updated = store.update_attribute(&key, &expression).await.unwrap();
        assert_eq!(Value::Object(updated), json!({"age": 31}));

        let found = store.get(&key).await.unwrap().unwrap();
        assert_eq!(found.into_value(), json!({"id": "u1", "name": "Ann", "age": 31}));

        let missing = store
            .update_attribute(&RecordKey::from_path("ghost"), &expression)
            .await;
        assert!(matches!(missing, Err(StorageError::ItemNotFound(_))));
    }

    #[tokio::test]
    async fn test_scan_limit() {
        let store = store(2).await;
        assert!(store.scan().await.unwrap().is_empty());
        for i in 0..4 {
            store.put(&record(json!({"id": i}))).await.unwrap();
        }
        assert_eq!(store.scan().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_number_and_string_keys_differ() {
        let store = store(100).await;
        store.put(&record(json!({"id": 1}))).await.unwrap();
        assert!(store.get(&RecordKey::from_path("1")).await.unwrap().is_none());
        assert!(store
            .get(&RecordKey::from_value(&json!(1)).unwrap())
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn test_integral_number_forms_share_a_key() {
        let store = store(100).await;
        store.put(&record(json!({"id": 1}))).await.unwrap();
        store
            .put(&record(json!({"id": 1.0, "name": "Ann"})))
            .await
            .unwrap();
        assert_eq!(store.scan().await.unwrap().len(), 1);

        let key = RecordKey::from_value(&serde_json::from_str("1e0").unwrap()).unwrap();
        let expression = UpdateExpression::set("name", json!("Anna")).unwrap();
        let updated = store.update_attribute(&key, &expression).await.unwrap();
        assert_eq!(Value::Object(updated), json!({"name": "Anna"}));
    }

    #[tokio::test]
    async fn test_rejects_invalid_table() {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        assert!(SqliteRecordStore::new(pool, "users where 1=1", 10).is_err());
    }
}
