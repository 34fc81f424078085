//! Record Context - Aggregate

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{RecordError, RecordKey};

/// 主键属性名
pub const KEY_ATTRIBUTE: &str = "id";

/// 记录
///
/// 除 `id` 外的属性都是透传数据，不做任何 schema 校验
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub fn from_map(attributes: Map<String, Value>) -> Self {
        Self(attributes)
    }

    /// 提取主键，缺失或类型不对时报错
    pub fn key(&self) -> Result<RecordKey, RecordError> {
        self.0
            .get(KEY_ATTRIBUTE)
            .map(RecordKey::from_value)
            .unwrap_or(Err(RecordError::MissingKey))
    }

    pub fn get(&self, attribute: &str) -> Option<&Value> {
        self.0.get(attribute)
    }

    pub fn set(&mut self, attribute: impl Into<String>, value: Value) {
        self.0.insert(attribute.into(), value);
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_key() {
        let record: Record = serde_json::from_value(json!({"id": "u1", "name": "Ann"})).unwrap();
        assert_eq!(record.key().unwrap(), RecordKey::from_path("u1"));

        let keyless: Record = serde_json::from_value(json!({"name": "Ann"})).unwrap();
        assert_eq!(keyless.key(), Err(RecordError::MissingKey));
    }

    #[test]
    fn test_transparent_serde() {
        let value = json!({"id": 7, "tags": ["a", "b"], "nested": {"x": null}});
        let record: Record = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(serde_json::to_value(&record).unwrap(), value);
        assert_eq!(record.into_value(), value);
    }
}
