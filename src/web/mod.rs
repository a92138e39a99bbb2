pub mod api;
pub mod state;
pub mod utils;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::web::{api::item, state::AppState};

/// 路由定义
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/item/:id", get(item::root_handler))
        .route("/item/:id/", get(item::root_handler))
        .route("/item/:id/*path", get(item::handler))
        .with_state(state)
        .layer(CatchPanicLayer::new())
        .layer(TraceLayer::new_for_http())
}
