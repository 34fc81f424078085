//! Request Descriptor

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::application::commands::UpdateRecord;
use crate::application::error::ApplicationError;
use crate::domain::record::{json_type_name, Record, RecordKey, UpdateExpression};

/// 路径参数中的主键名
pub const ID_PATH_PARAMETER: &str = "id";

/// 标准化的 HTTP 请求描述
///
/// 字段名与 API 网关代理事件保持一致（camelCase）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyRequest {
    pub http_method: String,

    #[serde(default)]
    pub path_parameters: Option<HashMap<String, String>>,

    /// JSON 字符串
    #[serde(default)]
    pub body: Option<String>,
}

impl ProxyRequest {
    pub fn new(http_method: impl Into<String>) -> Self {
        Self {
            http_method: http_method.into(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.path_parameters
            .get_or_insert_with(HashMap::new)
            .insert(ID_PATH_PARAMETER.to_string(), id.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn path_id(&self) -> Option<&str> {
        self.path_parameters
            .as_ref()
            .and_then(|params| params.get(ID_PATH_PARAMETER))
            .map(String::as_str)
    }

    /// 解析请求体，缺失时视为 JSON `null`
    pub fn parse_body(&self) -> Result<Value, ApplicationError> {
        match &self.body {
            Some(body) => Ok(serde_json::from_str(body)?),
            None => Ok(Value::Null),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateBody {
    id: Value,
    update_key: String,
    update_value: Value,
}

#[derive(Debug, Deserialize)]
struct DeleteBody {
    id: Value,
}

/// 分发目标
#[derive(Debug, Clone)]
pub enum Route {
    /// POST
    Save(Record),
    /// GET，带路径 id
    GetOne(RecordKey),
    /// GET，不带路径 id
    GetAll,
    /// PUT
    Update(UpdateRecord),
    /// DELETE
    Delete(RecordKey),
    /// 其他方法
    NotFound,
}

impl Route {
    /// 根据方法与路径参数确定分发目标，并解析该目标需要的请求体
    ///
    /// 未识别的方法不会读取请求体
    pub fn resolve(request: &ProxyRequest) -> Result<Self, ApplicationError> {
        match request.http_method.as_str() {
            "POST" => match request.parse_body()? {
                Value::Null => Ok(Route::Save(Record::new())),
                Value::Object(attributes) => Ok(Route::Save(Record::from_map(attributes))),
                other => Err(ApplicationError::malformed(format!(
                    "expected a JSON object, got {}",
                    json_type_name(&other)
                ))),
            },
            "GET" => Ok(match request.path_id() {
                Some(id) => Route::GetOne(RecordKey::from_path(id)),
                None => Route::GetAll,
            }),
            "PUT" => {
                let body: UpdateBody = serde_json::from_value(request.parse_body()?)?;
                Ok(Route::Update(UpdateRecord {
                    key: RecordKey::from_value(&body.id)?,
                    expression: UpdateExpression::set(body.update_key, body.update_value)?,
                }))
            }
            "DELETE" => {
                let body: DeleteBody = serde_json::from_value(request.parse_body()?)?;
                Ok(Route::Delete(RecordKey::from_value(&body.id)?))
            }
            _ => Ok(Route::NotFound),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Route::Save(_) => "save",
            Route::GetOne(_) => "get_one",
            Route::GetAll => "get_all",
            Route::Update(_) => "update",
            Route::Delete(_) => "delete",
            Route::NotFound => "not_found",
        }
    }
}
