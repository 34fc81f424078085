//! usertable - 记录 CRUD 服务入口
//!
//! 启动顺序: 配置 → 日志 → 记录存储 → 请求路由器 → HTTP 服务器

use std::sync::Arc;

use usertable::application::{RecordStorePort, RouterConfig};
use usertable::config::{load_config, print_config, AppConfig, StorageBackend};
use usertable::infrastructure::http::{AppState, HttpServer, ServerConfig};
use usertable::infrastructure::memory::InMemoryRecordStore;
use usertable::infrastructure::persistence::sled::{SledRecordStore, SledStoreConfig};
use usertable::infrastructure::persistence::sqlite::{
    create_pool, run_migrations, DatabaseConfig, SqliteRecordStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config);

    tracing::info!("usertable - record CRUD service");
    print_config(&config);

    // 存储句柄在这里创建一次，注入路由器
    let store = open_record_store(&config).await?;

    let router_config = RouterConfig {
        legacy_not_found_body: config.router.legacy_not_found_body,
    };
    let state = AppState::new(store, router_config);

    let server_config = ServerConfig::new(&config.server.host, config.server.port)
        .with_resource_path(&config.router.resource_path);
    let server = HttpServer::new(server_config, state);

    tracing::info!("Starting HTTP server...");

    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

/// 初始化日志
fn init_tracing(config: &AppConfig) {
    let log_filter = format!(
        "{},usertable={},tower_http=debug",
        config.log.level, config.log.level
    );
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if config.log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// 按配置创建记录存储
async fn open_record_store(config: &AppConfig) -> anyhow::Result<Arc<dyn RecordStorePort>> {
    let storage = &config.storage;

    let store: Arc<dyn RecordStorePort> = match storage.backend {
        StorageBackend::Sled => {
            if let Some(parent) = std::path::Path::new(&storage.sled_path).parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            let sled_config = SledStoreConfig {
                db_path: storage.sled_path.clone(),
                table: storage.table.clone(),
                scan_limit: storage.scan_limit,
            };
            Arc::new(SledRecordStore::new(&sled_config)?)
        }
        StorageBackend::Sqlite => {
            if let Some(parent) = std::path::Path::new(&storage.sqlite_path).parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            let db_config = DatabaseConfig {
                database_url: storage.database_url(),
                max_connections: storage.max_connections,
            };
            let pool = create_pool(&db_config).await?;
            run_migrations(&pool, &storage.table).await?;
            Arc::new(SqliteRecordStore::new(pool, &storage.table, storage.scan_limit)?)
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory store, records are lost on restart");
            Arc::new(InMemoryRecordStore::with_scan_limit(storage.scan_limit))
        }
    };

    Ok(store)
}
