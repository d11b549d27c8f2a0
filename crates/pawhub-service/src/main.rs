//! PawHub Service - HTTP API for pet classifieds
//!
//! This is the main entry point for the PawHub service.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pawhub_service::seed::{load_seed_file, seed_store};
use pawhub_service::{create_router, AppState, ServiceConfig, StoreBackend};
use pawhub_store::{MemoryStore, Store};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,pawhub=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting PawHub Service");

    // Load configuration from environment
    let config = ServiceConfig::from_env();

    tracing::info!(
        listen_addr = %config.listen_addr,
        store_backend = %config.store_backend,
        data_dir = %config.data_dir,
        seed_path = ?config.seed_path,
        default_page_size = config.default_page_size,
        max_page_size = config.max_page_size,
        "Service configuration loaded"
    );

    let store = open_store(&config)?;

    if let Some(path) = &config.seed_path {
        let listings = load_seed_file(path)?;
        let total = listings.len();
        let inserted = seed_store(store.as_ref(), listings)?;
        tracing::info!(path = %path, total, inserted, "Seeded listings");
    }

    // Build app state
    let state = AppState::new(store, config.clone());

    // Create the router
    let app = create_router(state);
    tracing::info!("Router configured with all API endpoints");

    // Start HTTP server
    tracing::info!(listen_addr = %config.listen_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn open_store(config: &ServiceConfig) -> Result<Arc<dyn Store>, Box<dyn std::error::Error>> {
    match config.store_backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store - listings are lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
        #[cfg(feature = "rocksdb-backend")]
        StoreBackend::Rocksdb => {
            tracing::info!(path = %config.data_dir, "Opening RocksDB store");
            Ok(Arc::new(pawhub_store::RocksStore::open(&config.data_dir)?))
        }
        #[cfg(not(feature = "rocksdb-backend"))]
        StoreBackend::Rocksdb => {
            Err("STORE_BACKEND=rocksdb requires the `rocksdb-backend` feature".into())
        }
    }
}
