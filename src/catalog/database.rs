use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite_migration::{Migrations, M};
use tracing::info;

/// 初始化数据库连接池并执行迁移
pub(crate) fn initialize_pool(
    db_path: &str,
    max_connections: u32,
) -> anyhow::Result<Pool<SqliteConnectionManager>> {
    let manager = SqliteConnectionManager::file(db_path);

    let pool = Pool::builder()
        .max_size(max_connections)
        .connection_timeout(std::time::Duration::from_secs(5))
        .build(manager)
        .map_err(|e| anyhow::anyhow!("Failed to initialize DB pool: {}", e))?;

    let mut conn = pool
        .get()
        .map_err(|e| anyhow::anyhow!("Failed to acquire init connection: {}", e))?;

    let migrations = Migrations::new(vec![
        // M1: 媒体库条目表
        M::up(
            "CREATE TABLE IF NOT EXISTS library_items (
                id TEXT PRIMARY KEY,
                path TEXT NOT NULL,
                is_file INTEGER NOT NULL DEFAULT 0
            );",
        ),
        // M2: 条目更新时间
        M::up("ALTER TABLE library_items ADD COLUMN updated_at TEXT DEFAULT '1970-01-01 00:00:00';"),
    ]);

    if let Err(e) = migrations.to_latest(&mut conn) {
        return Err(anyhow::anyhow!("Failed to apply database migrations: {}", e));
    }

    conn.execute_batch(
        "PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;
         PRAGMA temp_store = MEMORY;",
    )?;

    // 执行健康检查
    match conn.execute("CREATE TEMPORARY TABLE health_check (id INTEGER)", []) {
        Ok(_) => {
            let _ = conn.execute("DROP TABLE health_check", []);
        }
        Err(e) => return Err(anyhow::anyhow!("Database health check failed: {}", e)),
    }

    info!(
        "[Catalog] SQLite connection initialized at: {} (Pool size: {})",
        db_path, max_connections
    );
    Ok(pool)
}
