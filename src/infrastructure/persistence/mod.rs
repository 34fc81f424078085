//! Persistence Layer - 数据持久化
//!
//! Sled 和 SQLite 记录存储实现

pub mod sled;
pub mod sqlite;

pub use self::sled::SledRecordStore;
pub use self::sqlite::SqliteRecordStore;
