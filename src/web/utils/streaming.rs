use axum::{
    body::Body,
    http::{header, StatusCode},
    response::Response,
};
use std::io;
use std::path::PathBuf;
use tokio::fs::File as TokioFile;
use tokio_util::io::ReaderStream;
use tracing::trace;

use crate::config::DeliverySettings;
use crate::error::ServeError;
use crate::resolver::ResolvedTarget;
use crate::web::utils::mime::content_type_for_path;

/// nginx 内部重定向头
/// See: https://www.nginx.com/resources/wiki/start/topics/examples/x-accel/
pub const X_ACCEL_REDIRECT: &str = "x-accel-redirect";

const STREAM_CHUNK_SIZE: usize = 64 * 1024;

/// 交付方式
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryAction {
    /// 交给前端代理发送，`header` 为 `X-Accel-Redirect` 的值
    Offload { header: String },
    /// 由本进程流式发送文件
    StreamFile {
        path: PathBuf,
        content_type_override: Option<&'static str>,
    },
}

/// 交付策略
///
/// 代理前缀在构造时从配置注入，之后不可变，可在请求间共享。
#[derive(Debug, Clone, Default)]
pub struct DeliveryStrategy {
    offload_prefix: Option<String>,
}

impl DeliveryStrategy {
    pub fn new(settings: &DeliverySettings) -> Self {
        Self {
            offload_prefix: settings.offload_prefix().map(str::to_string),
        }
    }

    /// 纯决策，不访问文件系统
    pub fn decide(&self, target: ResolvedTarget) -> DeliveryAction {
        match &self.offload_prefix {
            Some(prefix) => DeliveryAction::Offload {
                header: format!("{}{}", prefix, target.full_path.display()),
            },
            None => DeliveryAction::StreamFile {
                path: target.full_path,
                content_type_override: target.content_type_override,
            },
        }
    }

    /// 决策并构建 HTTP 响应
    pub async fn deliver(&self, target: ResolvedTarget) -> Result<Response, ServeError> {
        match self.decide(target) {
            DeliveryAction::Offload { header } => Self::offload(header),
            DeliveryAction::StreamFile {
                path,
                content_type_override,
            } => Self::stream_file(path, content_type_override).await,
        }
    }

    fn offload(redirect: String) -> Result<Response, ServeError> {
        trace!("[Delivery] Use X-Accel to serve static file {}", redirect);
        Response::builder()
            .status(StatusCode::NO_CONTENT)
            .header(X_ACCEL_REDIRECT, redirect)
            .body(Body::empty())
            .map_err(|e| ServeError::Internal(format!("invalid offload header: {}", e)))
    }

    /// 文件句柄由响应体持有，传输结束、出错或客户端断开时随之释放
    async fn stream_file(
        path: PathBuf,
        content_type_override: Option<&'static str>,
    ) -> Result<Response, ServeError> {
        let file = match TokioFile::open(&path).await {
            Ok(file) => file,
            Err(source) => return Err(ServeError::FileUnavailable { path, source }),
        };
        let metadata = match file.metadata().await {
            Ok(m) => m,
            Err(source) => return Err(ServeError::FileUnavailable { path, source }),
        };
        if !metadata.is_file() {
            return Err(ServeError::FileUnavailable {
                path,
                source: io::Error::new(io::ErrorKind::NotFound, "not a regular file"),
            });
        }

        let content_type = content_type_for_path(&path, content_type_override);
        let stream = ReaderStream::with_capacity(file, STREAM_CHUNK_SIZE);

        Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, content_type)
            .header(header::CONTENT_LENGTH, metadata.len().to_string())
            .body(Body::from_stream(stream))
            .map_err(|e| ServeError::Internal(format!("failed to build file response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use tempfile::tempdir;

    fn strategy(prefix: Option<&str>) -> DeliveryStrategy {
        DeliveryStrategy::new(&DeliverySettings {
            x_accel_prefix: prefix.map(str::to_string),
        })
    }

    fn target(path: &str, mime: Option<&'static str>) -> ResolvedTarget {
        ResolvedTarget {
            full_path: PathBuf::from(path),
            content_type_override: mime,
        }
    }

    #[test]
    fn decide_offloads_when_prefix_configured() {
        let action = strategy(Some("/protected"))
            .decide(target("/data/book1/ch1.m4b", Some("audio/mp4")));
        assert_eq!(
            action,
            DeliveryAction::Offload {
                header: "/protected/data/book1/ch1.m4b".into()
            }
        );
    }

    #[test]
    fn decide_streams_without_prefix() {
        let action = strategy(None).decide(target("/data/book1/ch1.m4b", Some("audio/mp4")));
        assert_eq!(
            action,
            DeliveryAction::StreamFile {
                path: PathBuf::from("/data/book1/ch1.m4b"),
                content_type_override: Some("audio/mp4"),
            }
        );
    }

    #[tokio::test]
    async fn offload_never_opens_the_file() {
        // 路径不存在，若读取文件则会失败
        let response = strategy(Some("/internal"))
            .deliver(target("/definitely/missing/file.mp3", None))
            .await
            .expect("offload response");
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(
            response.headers()[X_ACCEL_REDIRECT],
            "/internal/definitely/missing/file.mp3"
        );
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn stream_file_sets_headers_and_body() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ch1.m4b");
        std::fs::write(&path, b"m4b-bytes").unwrap();

        let response = strategy(None)
            .deliver(ResolvedTarget {
                full_path: path,
                content_type_override: Some("audio/mp4"),
            })
            .await
            .expect("stream response");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "audio/mp4");
        assert_eq!(response.headers()[header::CONTENT_LENGTH], "9");
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(body.as_ref(), b"m4b-bytes");
    }

    #[tokio::test]
    async fn missing_file_is_unavailable() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope.mp3");
        let err = strategy(None)
            .deliver(ResolvedTarget {
                full_path: path.clone(),
                content_type_override: None,
            })
            .await
            .unwrap_err();
        match err {
            ServeError::FileUnavailable { path: p, source } => {
                assert_eq!(p, path);
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn directory_is_unavailable() {
        let dir = tempdir().unwrap();
        let err = strategy(None)
            .deliver(ResolvedTarget {
                full_path: dir.path().to_path_buf(),
                content_type_override: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ServeError::FileUnavailable { .. }));
    }
}
