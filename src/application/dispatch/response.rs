//! Response Descriptor

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const SUCCESS_MESSAGE: &str = "SUCCESS";
pub const NOT_FOUND_MESSAGE: &str = "404 Not found, try another route";

/// 响应中的操作标签
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Operation {
    Save,
    Get,
    Update,
    Delete,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Save => "SAVE",
            Operation::Get => "GET",
            Operation::Update => "UPDATE",
            Operation::Delete => "DELETE",
        }
    }
}

/// 成功响应体 `{operation, message, user}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub operation: Operation,
    pub message: String,
    pub user: Value,
}

impl Envelope {
    pub fn success(operation: Operation, user: Value) -> Self {
        Self {
            operation,
            message: SUCCESS_MESSAGE.to_string(),
            user,
        }
    }
}

impl From<Envelope> for Value {
    fn from(envelope: Envelope) -> Self {
        json!({
            "operation": envelope.operation.as_str(),
            "message": envelope.message,
            "user": envelope.user,
        })
    }
}

/// 标准化的 HTTP 响应描述
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    /// JSON 字符串
    pub body: String,
}

impl ProxyResponse {
    /// 所有响应都带 `content-type: application/json`
    pub fn new(status_code: u16, body: Value) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("content-type".to_string(), CONTENT_TYPE_JSON.to_string());

        Self {
            status_code,
            headers,
            body: body.to_string(),
        }
    }

    pub fn success(operation: Operation, user: Value) -> Self {
        Self::new(200, Envelope::success(operation, user).into())
    }

    /// 未识别方法的 404 响应
    ///
    /// `legacy` 为 true 时响应体是一个 JSON 字符串字面量（不是信封对象），
    /// 与旧调用方逐字节兼容；否则返回 `{"message": ...}`
    pub fn not_found(legacy: bool) -> Self {
        let body = if legacy {
            Value::String(NOT_FOUND_MESSAGE.to_string())
        } else {
            json!({ "message": NOT_FOUND_MESSAGE })
        };
        Self::new(404, body)
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers.get("content-type").map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope() {
        let response = ProxyResponse::success(Operation::Save, json!({"id": "u1"}));
        assert_eq!(response.status_code, 200);
        assert_eq!(response.content_type(), Some(CONTENT_TYPE_JSON));

        let envelope: Envelope = serde_json::from_str(&response.body).unwrap();
        assert_eq!(envelope.operation, Operation::Save);
        assert_eq!(envelope.message, "SUCCESS");
        assert_eq!(envelope.user, json!({"id": "u1"}));
    }

    #[test]
    fn test_legacy_not_found_body() {
        let response = ProxyResponse::not_found(true);
        assert_eq!(response.status_code, 404);
        assert_eq!(response.content_type(), Some(CONTENT_TYPE_JSON));
        assert_eq!(response.body, "\"404 Not found, try another route\"");
    }

    #[test]
    fn test_normalized_not_found_body() {
        let response = ProxyResponse::not_found(false);
        let body: Value = serde_json::from_str(&response.body).unwrap();
        assert_eq!(body, json!({"message": NOT_FOUND_MESSAGE}));
    }

    #[test]
    fn test_serialized_field_names() {
        let response = ProxyResponse::success(Operation::Get, json!({}));
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["statusCode"], json!(200));
        assert_eq!(value["headers"]["content-type"], json!("application/json"));
        assert!(value["body"].is_string());
    }
}
