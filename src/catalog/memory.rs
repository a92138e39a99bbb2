use super::{Item, ItemCatalog};
use std::collections::HashMap;
use std::sync::Arc;

/// 内存快照目录
///
/// 构建后不可变，克隆只增加引用计数，查询无需加锁。
#[derive(Clone, Default)]
pub struct MemoryCatalog {
    items: Arc<HashMap<String, Item>>,
}

impl MemoryCatalog {
    /// 相同 ID 的条目以后出现者为准
    pub fn from_items(items: impl IntoIterator<Item = Item>) -> Self {
        let items = items
            .into_iter()
            .map(|item| (item.id.clone(), item))
            .collect();
        Self {
            items: Arc::new(items),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl ItemCatalog for MemoryCatalog {
    fn find(&self, id: &str) -> anyhow::Result<Option<Item>> {
        Ok(self.items.get(id).cloned())
    }
}
