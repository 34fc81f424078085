//! Request Dispatch - 请求分发与响应构造
//!
//! 将标准化的 HTTP 请求描述（方法、可选路径参数、可选请求体）
//! 分发到对应的命令/查询处理器，并把结果包装成标准响应描述。

mod request;
mod response;
mod router;

pub use request::{ProxyRequest, Route, ID_PATH_PARAMETER};
pub use response::{
    Envelope, Operation, ProxyResponse, CONTENT_TYPE_JSON, NOT_FOUND_MESSAGE, SUCCESS_MESSAGE,
};
pub use router::{RequestRouter, RouterConfig};
