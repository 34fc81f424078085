//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 存储配置
    #[serde(default)]
    pub storage: StorageConfig,

    /// 路由配置
    #[serde(default)]
    pub router: RouterSettings,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 存储后端
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Sled 嵌入式数据库
    #[default]
    Sled,
    /// SQLite
    Sqlite,
    /// 进程内存（重启即丢失）
    Memory,
}

impl StorageBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageBackend::Sled => "sled",
            StorageBackend::Sqlite => "sqlite",
            StorageBackend::Memory => "memory",
        }
    }
}

/// 存储配置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// 存储后端
    #[serde(default)]
    pub backend: StorageBackend,

    /// 表名
    #[serde(default = "default_table")]
    pub table: String,

    /// Sled 数据库目录
    #[serde(default = "default_sled_path")]
    pub sled_path: String,

    /// SQLite 数据库文件路径
    #[serde(default = "default_sqlite_path")]
    pub sqlite_path: String,

    /// SQLite 最大连接数
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// 全表扫描的单页记录数（超出部分被静默截断）
    #[serde(default = "default_scan_limit")]
    pub scan_limit: usize,
}

fn default_table() -> String {
    "users".to_string()
}

fn default_sled_path() -> String {
    "data/usertable.sled".to_string()
}

fn default_sqlite_path() -> String {
    "data/usertable.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_scan_limit() -> usize {
    1000
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            table: default_table(),
            sled_path: default_sled_path(),
            sqlite_path: default_sqlite_path(),
            max_connections: default_max_connections(),
            scan_limit: default_scan_limit(),
        }
    }
}

impl StorageConfig {
    /// 获取 SQLite 数据库 URL
    pub fn database_url(&self) -> String {
        format!("sqlite:{}?mode=rwc", self.sqlite_path)
    }
}

/// 路由配置
#[derive(Debug, Clone, Deserialize)]
pub struct RouterSettings {
    /// 记录资源路径
    #[serde(default = "default_resource_path")]
    pub resource_path: String,

    /// 404 响应是否保留旧版字符串响应体
    #[serde(default = "default_legacy_not_found_body")]
    pub legacy_not_found_body: bool,
}

fn default_resource_path() -> String {
    "/users".to_string()
}

fn default_legacy_not_found_body() -> bool {
    true
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self {
            resource_path: default_resource_path(),
            legacy_not_found_body: default_legacy_not_found_body(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.storage.backend, StorageBackend::Sled);
        assert_eq!(config.storage.table, "users");
        assert_eq!(config.router.resource_path, "/users");
        assert!(config.router.legacy_not_found_body);
    }

    #[test]
    fn test_server_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_database_url() {
        let config = StorageConfig::default();
        assert_eq!(config.database_url(), "sqlite:data/usertable.db?mode=rwc");
    }
}
