//! Record Context - Value Objects

use serde_json::{Number, Value};

use super::RecordError;

/// 记录主键
///
/// 只接受 JSON 字符串或数字，与 key-value 服务的标量主键类型一致。
/// 存储时使用值的规范 JSON 编码，因此 `"1"` 与 `1` 是两个不同的主键，
/// 而 `1`、`1.0`、`1e0` 是同一个数字主键。
#[derive(Debug, Clone, PartialEq)]
pub struct RecordKey(Value);

impl RecordKey {
    pub fn from_value(value: &Value) -> Result<Self, RecordError> {
        match value {
            Value::String(_) => Ok(Self(value.clone())),
            Value::Number(n) => Ok(Self(Value::Number(canonical_number(n)))),
            Value::Null => Err(RecordError::MissingKey),
            other => Err(RecordError::InvalidKey(json_type_name(other).to_string())),
        }
    }

    /// 路径参数中的 id 总是字符串
    pub fn from_path(id: impl Into<String>) -> Self {
        Self(Value::String(id.into()))
    }

    /// 存储层使用的主键编码
    pub fn storage_key(&self) -> String {
        self.0.to_string()
    }
}

impl std::fmt::Display for RecordKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            Value::String(s) => write!(f, "{}", s),
            other => write!(f, "{}", other),
        }
    }
}

/// 整数值的浮点数折叠为整数表示，`-0.0` 视为 `0`
fn canonical_number(n: &Number) -> Number {
    if n.is_i64() || n.is_u64() {
        return n.clone();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
            Number::from(f as i64)
        }
        Some(f) if f.fract() == 0.0 && f >= 0.0 && f < u64::MAX as f64 => Number::from(f as u64),
        _ => n.clone(),
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
