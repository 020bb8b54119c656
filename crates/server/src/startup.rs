use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_from_env;
use configs::{AppConfig, StorageBackend, StorageConfig};
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::routes::{self, AppState};
use service::{
    proverb::ProverbService,
    runtime,
    storage::{JsonFileStore, MemoryStore, ProverbRepository},
};

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_from_env();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load the config file named by `CONFIG_PATH` (default `config.toml`).
pub fn load_config() -> anyhow::Result<AppConfig> {
    load_config_from(&configs::config_path())
}

/// Load and validate `path`. Environment variables are used only when the
/// file does not exist; a file that exists but is invalid is an error.
pub fn load_config_from(path: &str) -> anyhow::Result<AppConfig> {
    match AppConfig::load_and_validate_from(path) {
        Ok(cfg) => Ok(cfg),
        Err(e) if configs::is_missing_file(&e) => {
            warn!(path, "config file not found, using environment");
            AppConfig::from_env()
        }
        Err(e) => Err(e.context(format!("invalid config file `{path}`"))),
    }
}

/// Open the configured storage and wrap it in the proverb store.
pub async fn build_state(storage: &StorageConfig) -> anyhow::Result<AppState> {
    let repo: Arc<dyn ProverbRepository> = match storage.backend {
        StorageBackend::File => {
            runtime::ensure_env(&storage.data_file).await?;
            let store = JsonFileStore::new(&storage.data_file);
            // fail fast on an unreadable or malformed collection
            let count = store.load().await?.len();
            info!(path = %storage.data_file, count, "proverb collection opened");
            Arc::new(store)
        }
        StorageBackend::Memory => {
            warn!("using in-memory storage; proverbs are lost on exit");
            Arc::new(MemoryStore::default())
        }
    };
    Ok(AppState::new(ProverbService::new(repo)))
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let cfg = load_config()?;
    let state = build_state(&cfg.storage).await?;

    let app: Router = routes::build_router(state, build_cors());

    let addr = bind_addr(&cfg)?;
    info!(%addr, "starting proverbs server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
