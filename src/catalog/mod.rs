pub mod database;
pub mod memory;
pub mod sqlite;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use memory::MemoryCatalog;
pub use sqlite::SqliteCatalog;

/// 媒体库条目
///
/// 由外部目录维护，本服务只读。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// 条目唯一标识
    pub id: String,
    /// 文件或目录的绝对路径
    pub path: PathBuf,
    /// true 表示单文件条目，false 表示目录条目
    #[serde(alias = "isFile")]
    pub is_file: bool,
}

/// 按 ID 查询条目的能力
///
/// 实现必须支持并发只读查询；写入由目录的所有者负责。
pub trait ItemCatalog: Send + Sync {
    fn find(&self, id: &str) -> anyhow::Result<Option<Item>>;
}

/// 读取 JSON 种子文件（条目数组）
pub fn load_seed_file(path: &Path) -> anyhow::Result<Vec<Item>> {
    let raw = std::fs::read(path)
        .map_err(|e| anyhow::anyhow!("Failed to read seed file {}: {}", path.display(), e))?;
    let items: Vec<Item> = serde_json::from_slice(&raw)
        .map_err(|e| anyhow::anyhow!("Invalid seed file {}: {}", path.display(), e))?;
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn load_seed_file_accepts_both_field_spellings() {
        let dir = tempdir().unwrap();
        let seed = dir.path().join("seed.json");
        std::fs::write(
            &seed,
            r#"[
                {"id": "abc", "path": "/data/book1", "is_file": false},
                {"id": "def", "path": "/data/single.mp3", "isFile": true}
            ]"#,
        )
        .unwrap();

        let items = load_seed_file(&seed).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].path, PathBuf::from("/data/book1"));
        assert!(!items[0].is_file);
        assert!(items[1].is_file);
    }

    #[test]
    fn load_seed_file_rejects_malformed_json() {
        let dir = tempdir().unwrap();
        let seed = dir.path().join("seed.json");
        std::fs::write(&seed, "{ not json").unwrap();
        assert!(load_seed_file(&seed).is_err());
    }
}
