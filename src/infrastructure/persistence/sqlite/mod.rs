//! SQLite Persistence - SQLite 数据库记录存储

mod database;
mod record_store;

pub use database::*;
pub use record_store::*;
