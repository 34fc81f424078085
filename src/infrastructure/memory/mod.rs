//! Memory Layer - 内存实现

mod record_store;

pub use record_store::InMemoryRecordStore;
