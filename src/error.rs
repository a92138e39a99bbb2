use std::path::PathBuf;

/// 单次请求的终止性错误，不做重试
#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    /// 目录中不存在该条目
    #[error("Item not found with id {0}")]
    NotFound(String),

    /// 子路径经规范化后落在条目目录之外
    #[error("sub-path {sub_path:?} escapes item {item_id}")]
    PathEscape { item_id: String, sub_path: String },

    /// 目标文件无法打开或不是普通文件
    #[error("file unavailable: {}", .path.display())]
    FileUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("catalog lookup failed: {0}")]
    Catalog(#[source] anyhow::Error),

    #[error("{0}")]
    Internal(String),
}
