//! Record Context - 记录限界上下文
//!
//! 职责:
//! - 记录（以 `id` 为主键的属性集合）
//! - 主键值对象
//! - 参数化的单属性更新表达式

mod aggregate;
mod errors;
mod update_expression;
mod value_objects;

pub use aggregate::{Record, KEY_ATTRIBUTE};
pub use errors::RecordError;
pub use update_expression::UpdateExpression;
pub use value_objects::RecordKey;

pub(crate) use value_objects::json_type_name;
