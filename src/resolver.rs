use std::path::{Component, Path, PathBuf};

use crate::catalog::ItemCatalog;
use crate::error::ServeError;
use crate::web::utils::mime::audio_mime_override;

/// 单次请求解析出的目标文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    pub full_path: PathBuf,
    /// 默认 MIME 推断不可靠的音频格式使用的覆盖类型
    pub content_type_override: Option<&'static str>,
}

/// 条目 ID + 子路径 -> 文件系统路径
pub struct FileResolver;

impl FileResolver {
    /// 查询目录并构造目标路径
    ///
    /// 单文件条目忽略子路径；目录条目按 join 语义拼接子路径，
    /// 结果越出条目目录时返回 `PathEscape`。未命中的 ID 不会触及文件系统。
    pub fn resolve(
        item_id: &str,
        sub_path: &str,
        catalog: &dyn ItemCatalog,
    ) -> Result<ResolvedTarget, ServeError> {
        if item_id.is_empty() {
            return Err(ServeError::NotFound(String::new()));
        }

        let item = catalog
            .find(item_id)
            .map_err(ServeError::Catalog)?
            .ok_or_else(|| ServeError::NotFound(item_id.to_string()))?;

        let full_path = if item.is_file {
            item.path
        } else {
            join_within(&item.path, sub_path).ok_or_else(|| ServeError::PathEscape {
                item_id: item_id.to_string(),
                sub_path: sub_path.to_string(),
            })?
        };

        let content_type_override = full_path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(audio_mime_override);

        Ok(ResolvedTarget {
            full_path,
            content_type_override,
        })
    }
}

/// 词法规范化（不访问文件系统）
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// 在 `root` 下拼接 `sub_path`，越界返回 None
///
/// 子路径开头的 `/` 视为相对路径，空段与 `.` 被忽略。
fn join_within(root: &Path, sub_path: &str) -> Option<PathBuf> {
    let mut out = normalize(root);
    let mut depth = 0usize;
    for part in sub_path.split('/') {
        match part {
            "" | "." => continue,
            ".." => {
                if depth == 0 {
                    return None;
                }
                out.pop();
                depth -= 1;
            }
            part => {
                out.push(part);
                depth += 1;
            }
        }
    }
    Some(out)
}
