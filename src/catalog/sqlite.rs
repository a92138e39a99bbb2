use super::{database, Item, ItemCatalog};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, OptionalExtension};
use std::path::PathBuf;
use tracing::info;

const UPSERT_ITEM: &str = "INSERT INTO library_items (id, path, is_file, updated_at)
     VALUES (?1, ?2, ?3, datetime('now', 'localtime'))
     ON CONFLICT(id) DO UPDATE SET
        path = excluded.path,
        is_file = excluded.is_file,
        updated_at = excluded.updated_at";

/// 持久化目录：SQLite 连接池
#[derive(Clone)]
pub struct SqliteCatalog {
    pool: Pool<SqliteConnectionManager>,
}

impl SqliteCatalog {
    /// 打开数据库并执行迁移
    ///
    /// # Parameters
    /// - `db_path`: 数据库文件路径
    /// - `max_connections`: 最大连接数
    pub fn new(db_path: &str, max_connections: u32) -> anyhow::Result<Self> {
        let pool = database::initialize_pool(db_path, max_connections)?;
        Ok(Self { pool })
    }

    /// 写入或覆盖条目
    pub fn upsert(&self, item: &Item) -> anyhow::Result<()> {
        let conn = self.pool.get()?;
        conn.execute(
            UPSERT_ITEM,
            params![&item.id, item.path.to_string_lossy().into_owned(), item.is_file],
        )?;
        Ok(())
    }

    /// 批量写入（单事务）
    pub fn upsert_all(&self, items: &[Item]) -> anyhow::Result<usize> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(UPSERT_ITEM)?;
            for item in items {
                stmt.execute(params![
                    &item.id,
                    item.path.to_string_lossy().into_owned(),
                    item.is_file
                ])?;
            }
        }
        tx.commit()?;
        info!("[Catalog] {} items upserted", items.len());
        Ok(items.len())
    }

    pub fn list_all(&self) -> anyhow::Result<Vec<Item>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare("SELECT id, path, is_file FROM library_items ORDER BY id")?;

        let rows = stmt.query_map([], |row| {
            Ok(Item {
                id: row.get(0)?,
                path: PathBuf::from(row.get::<_, String>(1)?),
                is_file: row.get(2)?,
            })
        })?;

        let mut results = Vec::new();
        for item in rows {
            results.push(item?);
        }
        Ok(results)
    }

    /// 获取底层连接（用于自定义查询）
    pub fn get_conn(&self) -> anyhow::Result<r2d2::PooledConnection<SqliteConnectionManager>> {
        Ok(self.pool.get()?)
    }
}

impl ItemCatalog for SqliteCatalog {
    fn find(&self, id: &str) -> anyhow::Result<Option<Item>> {
        let conn = self.pool.get()?;
        let mut stmt =
            conn.prepare_cached("SELECT id, path, is_file FROM library_items WHERE id = ?1")?;
        let item = stmt
            .query_row(params![id], |row| {
                Ok(Item {
                    id: row.get(0)?,
                    path: PathBuf::from(row.get::<_, String>(1)?),
                    is_file: row.get(2)?,
                })
            })
            .optional()?;
        Ok(item)
    }
}
