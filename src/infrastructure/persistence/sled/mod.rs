//! Sled Persistence - Sled 嵌入式数据库记录存储

mod record_store;

pub use record_store::{SledRecordStore, SledStoreConfig};
