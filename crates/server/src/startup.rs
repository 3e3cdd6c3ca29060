use std::{net::SocketAddr, path::Path, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_from_env;
use configs::{AppConfig, StoreBackend};
use dotenvy::dotenv;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes;
use crate::state::ServerState;
use service::{
    pet::{PetRepository, PetService, SeaOrmPetRepository},
    storage::{blob_store::LocalBlobStore, json_pet_store::JsonPetStore},
};

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_from_env();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

/// Open the configured document store; postgres gets its migrations applied first.
pub async fn build_repository(cfg: &AppConfig) -> anyhow::Result<Arc<dyn PetRepository>> {
    match cfg.storage.backend {
        StoreBackend::Postgres => {
            let db = models::db::connect_with_config(&models::db::DatabaseConfig::from(&cfg.database)).await?;
            migration::Migrator::up(&db, None).await?;
            info!(backend = "postgres", "pet store ready");
            let repo: Arc<dyn PetRepository> = Arc::new(SeaOrmPetRepository::new(db));
            Ok(repo)
        }
        StoreBackend::Json => {
            let store: Arc<dyn PetRepository> = JsonPetStore::open(&cfg.storage.data_file).await?;
            info!(backend = "json", data_file = %cfg.storage.data_file, "pet store ready");
            Ok(store)
        }
    }
}

/// Wire collaborators from config into a ready-to-serve router.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    let mut dirs = vec![Path::new(&cfg.storage.blob_root)];
    if cfg.storage.backend == StoreBackend::Json {
        if let Some(parent) = Path::new(&cfg.storage.data_file).parent().filter(|p| !p.as_os_str().is_empty()) {
            dirs.push(parent);
        }
    }
    common::env::ensure_dirs(&dirs).await?;

    let repo = build_repository(cfg).await?;
    let blobs = LocalBlobStore::new(&cfg.storage.blob_root, &cfg.storage.public_prefix).await?;
    let state = ServerState::new(
        PetService::new(repo, blobs),
        &cfg.storage.blob_root,
        &cfg.storage.public_prefix,
    );
    Ok(routes::build_router(state, build_cors(), cfg.upload.max_body_bytes))
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let cfg = AppConfig::load_or_env()?;
    let app = build_app(&cfg).await?;

    // Bind and serve
    let addr = bind_addr(&cfg)?;
    info!(%addr, backend = ?cfg.storage.backend, "starting pet listing server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
