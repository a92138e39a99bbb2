use std::sync::Arc;
use tracing::info;

use item_static::catalog::{load_seed_file, ItemCatalog, MemoryCatalog, SqliteCatalog};
use item_static::config::Settings;
use item_static::web::{self, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("item_static=info".parse()?)
                .add_directive("tower_http=debug".parse()?),
        )
        .init();

    info!("[Startup] item-static initializing...");

    let settings = Settings::new()?;
    info!(
        "[Config] Binding at {}:{}",
        settings.server.host, settings.server.port
    );

    let store = SqliteCatalog::new(&settings.catalog.url, settings.catalog.max_connections)?;
    if let Some(seed) = &settings.catalog.seed_file {
        let items = load_seed_file(seed)?;
        store.upsert_all(&items)?;
        info!("[Catalog] Seeded from {}", seed.display());
    }

    let catalog: Arc<dyn ItemCatalog> = if settings.catalog.snapshot {
        let snapshot = MemoryCatalog::from_items(store.list_all()?);
        info!("[Catalog] Serving snapshot of {} items", snapshot.len());
        Arc::new(snapshot)
    } else {
        Arc::new(store)
    };

    match settings.delivery.offload_prefix() {
        Some(prefix) => info!("[Config] X-Accel offload enabled with prefix {}", prefix),
        None => info!("[Config] Serving files directly"),
    }

    let state = Arc::new(AppState::new(catalog, &settings.delivery));
    let app = web::router(state);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("[Startup] Service ready at http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
