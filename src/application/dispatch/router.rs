//! Request Router / Responder
//!
//! `handle(request) -> response`：每个请求只触发一次存储调用。
//! 存储或解析错误原样向上抛出，由宿主 HTTP 边界决定默认的失败响应。

use serde_json::{Map, Value};
use std::sync::Arc;

use super::request::{ProxyRequest, Route};
use super::response::{Operation, ProxyResponse};
use crate::application::commands::handlers::{
    DeleteRecordHandler, SaveRecordHandler, UpdateRecordHandler,
};
use crate::application::commands::{DeleteRecord, SaveRecord};
use crate::application::error::ApplicationError;
use crate::application::ports::RecordStorePort;
use crate::application::queries::handlers::{GetRecordHandler, ListRecordsHandler};
use crate::application::queries::{GetRecord, ListRecords};
use crate::domain::record::Record;

/// 路由器配置
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// 404 响应是否保留旧版的字符串响应体
    pub legacy_not_found_body: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            legacy_not_found_body: true,
        }
    }
}

/// 请求路由器
///
/// 存储句柄在构造时注入，路由器本身不持有可变状态
pub struct RequestRouter {
    config: RouterConfig,

    // ========== Command Handlers ==========
    save_handler: SaveRecordHandler,
    update_handler: UpdateRecordHandler,
    delete_handler: DeleteRecordHandler,

    // ========== Query Handlers ==========
    get_handler: GetRecordHandler,
    list_handler: ListRecordsHandler,
}

impl RequestRouter {
    pub fn new(store: Arc<dyn RecordStorePort>, config: RouterConfig) -> Self {
        Self {
            config,
            save_handler: SaveRecordHandler::new(store.clone()),
            update_handler: UpdateRecordHandler::new(store.clone()),
            delete_handler: DeleteRecordHandler::new(store.clone()),
            get_handler: GetRecordHandler::new(store.clone()),
            list_handler: ListRecordsHandler::new(store),
        }
    }

    pub fn with_default_config(store: Arc<dyn RecordStorePort>) -> Self {
        Self::new(store, RouterConfig::default())
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub async fn handle(&self, request: ProxyRequest) -> Result<ProxyResponse, ApplicationError> {
        let route = Route::resolve(&request)?;

        tracing::debug!(
            method = %request.http_method,
            route = route.name(),
            "Dispatching request"
        );

        let response = match route {
            Route::Save(record) => {
                let saved = self.save_handler.handle(SaveRecord { record }).await?;
                ProxyResponse::success(Operation::Save, saved.into_value())
            }
            Route::GetOne(key) => {
                let record = self.get_handler.handle(GetRecord { key }).await?;
                ProxyResponse::success(Operation::Get, record_or_empty(record))
            }
            Route::GetAll => {
                let records = self.list_handler.handle(ListRecords).await?;
                // 空表返回 `{}` 而不是 `[]`
                let user = if records.is_empty() {
                    empty_object()
                } else {
                    Value::Array(records.into_iter().map(Record::into_value).collect())
                };
                ProxyResponse::success(Operation::Get, user)
            }
            Route::Update(command) => {
                let updated = self.update_handler.handle(command).await?;
                ProxyResponse::success(Operation::Update, Value::Object(updated))
            }
            Route::Delete(key) => {
                let prior = self.delete_handler.handle(DeleteRecord { key }).await?;
                ProxyResponse::success(Operation::Delete, record_or_empty(prior))
            }
            Route::NotFound => {
                tracing::debug!(method = %request.http_method, "Unrecognized method");
                ProxyResponse::not_found(self.config.legacy_not_found_body)
            }
        };

        Ok(response)
    }
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

fn record_or_empty(record: Option<Record>) -> Value {
    record.map(Record::into_value).unwrap_or_else(empty_object)
}
