use std::sync::Arc;

use axum::Router;
use configs::{AppConfig, StorageBackend};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use service::product::{
    repo::{file::JsonFileProductStore, seaorm::SeaOrmProductStore},
    InMemoryProductStore, ProductService, ProductServiceConfig, ProductStore,
};
use service::validation::Validator;

use crate::errors::StartupError;
use crate::routes::{self, AppState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load `config.toml` (or `CONFIG_PATH`) with environment overrides; a missing file means defaults.
pub fn load_config() -> Result<AppConfig, StartupError> {
    AppConfig::load_or_default().map_err(|e| StartupError::InvalidConfig(e.to_string()))
}

async fn open_store(cfg: &AppConfig) -> Result<Arc<dyn ProductStore>, StartupError> {
    let store: Arc<dyn ProductStore> = match cfg.storage.backend {
        StorageBackend::Memory => {
            warn!(event = "storage_volatile", "in-memory backend selected; records are lost on restart");
            Arc::new(InMemoryProductStore::new())
        }
        StorageBackend::File => {
            let store = JsonFileProductStore::open(cfg.storage.data_file.as_str())
                .await
                .map_err(|e| StartupError::Storage(e.to_string()))?;
            Arc::new(store)
        }
        StorageBackend::Postgres => {
            let db = models::db::connect_with_config(&cfg.database).await?;
            models::db::migrate(&db).await?;
            Arc::new(SeaOrmProductStore::new(db))
        }
    };
    info!(event = "storage_ready", backend = ?cfg.storage.backend, "product store opened");
    Ok(store)
}

/// Open the configured store and wire the product service around it.
pub async fn build_state(cfg: &AppConfig) -> Result<AppState, StartupError> {
    let store = open_store(cfg).await?;
    let validator = Validator::from_config(&cfg.validation);
    let service = ProductService::new(store, validator, ProductServiceConfig::from(&cfg.validation));
    Ok(AppState { products: Arc::new(service) })
}

/// Router with CORS and request tracing applied.
pub fn app(state: AppState) -> Router {
    routes::build_router(state, build_cors())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(event = "signal_error", error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!(event = "shutdown_signal", "received Ctrl+C, shutting down");
}

/// Build the app and serve it until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let state = build_state(&cfg).await?;
    let listener = TcpListener::bind((cfg.server.host.as_str(), cfg.server.port)).await?;
    let addr = listener.local_addr()?;
    info!(%addr, "starting product api");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
