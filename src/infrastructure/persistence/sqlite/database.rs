//! SQLite 连接池与按表名建表

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use std::time::Duration;

/// 遇到写锁时的等待时间
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// 数据库配置
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// 连接 URL，如 `sqlite:data/usertable.db?mode=rwc`
    pub database_url: String,
    /// 最大连接数
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite:./data/usertable.db?mode=rwc".to_string(),
            max_connections: 5,
        }
    }
}

impl DatabaseConfig {
    pub fn in_memory() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
        }
    }
}

/// 数据库连接池
pub type DbPool = Pool<Sqlite>;

/// 创建数据库连接池
///
/// WAL 和 busy_timeout 写在连接选项里，池中每个连接都会生效
pub async fn create_pool(config: &DatabaseConfig) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(BUSY_TIMEOUT);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await?;

    tracing::info!(
        url = %config.database_url,
        max_connections = config.max_connections,
        "SQLite pool created"
    );

    Ok(pool)
}

/// 表名只允许字母、数字和下划线，且不能以数字开头
///
/// 表名会被拼接进 SQL 文本，不能作为参数绑定
pub fn is_valid_table_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// 运行数据库迁移
pub async fn run_migrations(pool: &DbPool, table: &str) -> Result<(), sqlx::Error> {
    if !is_valid_table_name(table) {
        return Err(sqlx::Error::Configuration(
            format!("invalid table name: {}", table).into(),
        ));
    }

    // id 列保存主键的规范 JSON 编码，item 列保存整条记录
    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            id TEXT PRIMARY KEY,
            item TEXT NOT NULL
        )
        "#,
        table
    ))
    .execute(pool)
    .await?;

    tracing::info!(table = %table, "Database migrations completed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_in_memory_db() {
        let config = DatabaseConfig::in_memory();
        let pool = create_pool(&config).await.unwrap();
        run_migrations(&pool, "users").await.unwrap();
    }

    #[tokio::test]
    async fn test_rejects_invalid_table_name() {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        assert!(run_migrations(&pool, "users; DROP TABLE x").await.is_err());
    }

    #[test]
    fn test_table_name_rules() {
        assert!(is_valid_table_name("users"));
        assert!(is_valid_table_name("_users_2"));
        assert!(!is_valid_table_name(""));
        assert!(!is_valid_table_name("2users"));
        assert!(!is_valid_table_name("user-table"));
    }
}
