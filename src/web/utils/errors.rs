use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use std::io;

use crate::error::ServeError;

impl ServeError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServeError::NotFound(_) => StatusCode::NOT_FOUND,
            ServeError::PathEscape { .. } => StatusCode::FORBIDDEN,
            ServeError::FileUnavailable { source, .. } => match source.kind() {
                io::ErrorKind::NotFound => StatusCode::NOT_FOUND,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ServeError::Catalog(_) | ServeError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServeError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            ServeError::NotFound(_) => {
                tracing::debug!("[Item] {}", self);
                self.to_string()
            }
            ServeError::PathEscape { .. } => {
                tracing::warn!("[Item] Rejected request: {}", self);
                "Path escapes item directory".to_string()
            }
            ServeError::FileUnavailable { source, .. } if status == StatusCode::NOT_FOUND => {
                tracing::debug!("[Item] {} ({})", self, source);
                "File not found".to_string()
            }
            ServeError::FileUnavailable { source, .. } => {
                tracing::error!("[Item] {} ({})", self, source);
                public_message("Internal error", &format!("{}: {}", self, source))
            }
            ServeError::Catalog(e) => {
                tracing::error!("[Item] Catalog lookup failed: {:#}", e);
                public_message("Internal error", &format!("{:#}", e))
            }
            ServeError::Internal(details) => {
                tracing::error!("[Item] {}", details);
                public_message("Internal error", details)
            }
        };

        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            body,
        )
            .into_response()
    }
}

/// 对外错误消息：调试构建附带细节，发布构建只返回安全文案
pub fn public_message(safe_message: &str, details: &str) -> String {
    if cfg!(debug_assertions) {
        format!("{}: {}", safe_message, details)
    } else {
        safe_message.to_string()
    }
}
