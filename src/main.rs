//! FoodBridge server: donation pickup and delivery coordination.
//!
//! Main entry point that wires all crates together and starts the server.

use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use foodbridge_api::AppState;
use foodbridge_core::config::{AppConfig, StoreBackend};
use foodbridge_core::error::AppError;
use foodbridge_database::{DatabasePool, MemoryStore, Stores};

#[tokio::main]
async fn main() {
    let env = std::env::var("FOODBRIDGE_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    info!(version = env!("CARGO_PKG_VERSION"), "Starting FoodBridge");

    let (stores, pool) = match config.database.backend {
        StoreBackend::Postgres => {
            let pool = DatabasePool::connect(&config.database).await?;
            if config.database.run_migrations {
                foodbridge_database::migration::run_migrations(pool.pool()).await?;
            }
            (Stores::postgres(pool.pool().clone()), Some(pool))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using the in-memory store; all data is lost on shutdown");
            (Stores::memory(MemoryStore::new()), None)
        }
    };

    let state = AppState::new(config, stores);
    foodbridge_api::serve(state).await?;

    if let Some(pool) = pool {
        pool.close().await;
    }
    Ok(())
}
