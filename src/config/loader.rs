//! 配置加载
//!
//! 默认值 → config.toml / config.local.toml → `USERTABLE_*` 环境变量，后者覆盖前者。
//! 加载后校验端口、表名、扫描上限和资源路径。

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;
use crate::infrastructure::persistence::sqlite::is_valid_table_name;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `USERTABLE_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `USERTABLE_SERVER__PORT=8080`
/// - `USERTABLE_STORAGE__BACKEND=sqlite`
/// - `USERTABLE_STORAGE__TABLE=customers`
/// - `USERTABLE_ROUTER__LEGACY_NOT_FOUND_BODY=false`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 3000)?
        .set_default("storage.backend", "sled")?
        .set_default("storage.table", "users")?
        .set_default("storage.sled_path", "data/usertable.sled")?
        .set_default("storage.sqlite_path", "data/usertable.db")?
        .set_default("storage.max_connections", 5)?
        .set_default("storage.scan_limit", 1000)?
        .set_default("router.resource_path", "/users")?
        .set_default("router.legacy_not_found_body", true)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 例如: USERTABLE_STORAGE__BACKEND=sqlite
    builder = builder.add_source(
        Environment::with_prefix("USERTABLE")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if !is_valid_table_name(&config.storage.table) {
        return Err(ConfigError::ValidationError(format!(
            "Table name must be a non-empty identifier: {:?}",
            config.storage.table
        )));
    }

    if config.storage.scan_limit == 0 {
        return Err(ConfigError::ValidationError(
            "Scan limit cannot be 0".to_string(),
        ));
    }

    let path = config.router.resource_path.trim_end_matches('/');
    if !config.router.resource_path.starts_with('/') || path.is_empty() {
        return Err(ConfigError::ValidationError(format!(
            "Resource path must start with '/' and not be the root: {:?}",
            config.router.resource_path
        )));
    }

    // `:` 和 `*` 是 axum 的路径参数语法，注册路由时会 panic
    if path.contains([':', '*']) {
        return Err(ConfigError::ValidationError(format!(
            "Resource path cannot contain ':' or '*': {}",
            path
        )));
    }

    if matches!(path, "/ping" | "/invoke") {
        return Err(ConfigError::ValidationError(format!(
            "Resource path collides with a built-in route: {}",
            path
        )));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}", config.server.addr());
    tracing::info!("Storage Backend: {}", config.storage.backend.as_str());
    tracing::info!("Table: {}", config.storage.table);
    match config.storage.backend {
        super::StorageBackend::Sled => {
            tracing::info!("Sled Path: {}", config.storage.sled_path)
        }
        super::StorageBackend::Sqlite => {
            tracing::info!("SQLite Path: {}", config.storage.sqlite_path);
            tracing::info!("SQLite Max Connections: {}", config.storage.max_connections);
        }
        super::StorageBackend::Memory => {}
    }
    tracing::info!("Scan Limit: {}", config.storage.scan_limit);
    tracing::info!("Resource Path: {}", config.router.resource_path);
    tracing::info!("Legacy 404 Body: {}", config.router.legacy_not_found_body);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
