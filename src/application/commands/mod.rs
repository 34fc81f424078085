//! 应用层 - 命令（写操作）
//!
//! CQRS 命令侧：保存、更新、删除记录

mod record_commands;

pub mod handlers;

pub use record_commands::*;
