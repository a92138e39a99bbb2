use crate::error::ServeError;
use crate::resolver::FileResolver;
use crate::web::state::AppState;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

/// 条目静态文件：`GET /item/:id/*path`
pub async fn handler(
    State(state): State<Arc<AppState>>,
    Path((id, sub_path)): Path<(String, String)>,
) -> Response {
    serve(&state, id, sub_path).await
}

/// 不带子路径的请求：`GET /item/:id`
pub async fn root_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    serve(&state, id, String::new()).await
}

async fn serve(state: &AppState, id: String, sub_path: String) -> Response {
    // 目录查询可能落到 SQLite，放到阻塞线程执行
    let catalog = state.catalog.clone();
    let resolved =
        tokio::task::spawn_blocking(move || FileResolver::resolve(&id, &sub_path, catalog.as_ref()))
            .await;

    let target = match resolved {
        Ok(Ok(target)) => target,
        Ok(Err(e)) => return e.into_response(),
        Err(join_err) => {
            return ServeError::Internal(format!("resolver task failed: {}", join_err))
                .into_response()
        }
    };

    match state.delivery.deliver(target).await {
        Ok(response) => response,
        Err(e) => e.into_response(),
    }
}
