//! Domain Layer - 领域层
//!
//! 只有一个限界上下文:
//! - Record Context: 以 `id` 为主键的记录

pub mod record;
