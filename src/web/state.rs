use crate::catalog::ItemCatalog;
use crate::config::DeliverySettings;
use crate::web::utils::streaming::DeliveryStrategy;
use std::sync::Arc;

/// Web 应用全局状态
///
/// 职责：包含所有跨请求共享的只读对象，通过 Arc 注入到 Axum 的 Handler 中。
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn ItemCatalog>,
    pub delivery: DeliveryStrategy,
}

impl AppState {
    pub fn new(catalog: Arc<dyn ItemCatalog>, delivery: &DeliverySettings) -> Self {
        Self {
            catalog,
            delivery: DeliveryStrategy::new(delivery),
        }
    }
}
