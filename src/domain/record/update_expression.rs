//! Record Context - Update Expression
//!
//! 单属性更新表达式，形如 `SET #attr = :value`。
//! 属性名绑定到 `#attr` 占位符，新值绑定到 `:value`，
//! 调用方传入的属性名永远不会拼接进表达式文本。

use serde_json::{Map, Value};
use std::collections::BTreeMap;

use super::{Record, RecordError, KEY_ATTRIBUTE};

const NAME_PLACEHOLDER: &str = "#attr";
const VALUE_PLACEHOLDER: &str = ":value";

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateExpression {
    expression: String,
    names: BTreeMap<String, String>,
    values: BTreeMap<String, Value>,
}

impl UpdateExpression {
    /// 构建 `SET #attr = :value`
    pub fn set(attribute: impl Into<String>, value: Value) -> Result<Self, RecordError> {
        let attribute = attribute.into();
        if attribute.is_empty() {
            return Err(RecordError::EmptyAttributeName);
        }
        if attribute == KEY_ATTRIBUTE {
            return Err(RecordError::KeyAttributeUpdate(attribute));
        }

        let mut names = BTreeMap::new();
        names.insert(NAME_PLACEHOLDER.to_string(), attribute);
        let mut values = BTreeMap::new();
        values.insert(VALUE_PLACEHOLDER.to_string(), value);

        Ok(Self {
            expression: format!("SET {} = {}", NAME_PLACEHOLDER, VALUE_PLACEHOLDER),
            names,
            values,
        })
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// 解析后的目标属性名
    pub fn attribute(&self) -> Result<&str, RecordError> {
        self.names
            .get(NAME_PLACEHOLDER)
            .map(String::as_str)
            .ok_or_else(|| RecordError::UnboundPlaceholder(NAME_PLACEHOLDER.to_string()))
    }

    /// 将表达式应用到记录上，返回更新后的属性（仅包含被修改的那一个）
    pub fn apply(&self, record: &mut Record) -> Result<Map<String, Value>, RecordError> {
        let attribute = self.attribute()?;
        let value = self
            .values
            .get(VALUE_PLACEHOLDER)
            .ok_or_else(|| RecordError::UnboundPlaceholder(VALUE_PLACEHOLDER.to_string()))?;

        if attribute == KEY_ATTRIBUTE {
            return Err(RecordError::KeyAttributeUpdate(attribute.to_string()));
        }

        record.set(attribute, value.clone());

        let mut updated = Map::new();
        updated.insert(attribute.to_string(), value.clone());
        Ok(updated)
    }
}
