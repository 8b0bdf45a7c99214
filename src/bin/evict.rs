use dotenvy::dotenv;
use rust_lfs_backend::config::ServerConfig;
use rust_lfs_backend::services::store::ObjectStore;
use rust_lfs_backend::utils::validation::validate_oid;
use std::env;

use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Out-of-band object removal. The HTTP surface deliberately has no delete
/// endpoint; maintenance happens here, directly against the store.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "evict=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let oid = match env::args().nth(1) {
        Some(oid) => oid,
        None => {
            error!("❌ Missing argument: oid of the object to evict.");
            info!("Usage: cargo run --bin evict -- <oid>");
            std::process::exit(1);
        }
    };

    if let Err(e) = validate_oid(&oid) {
        error!("❌ {}", e);
        std::process::exit(1);
    }

    let config = ServerConfig::from_env();
    let store = ObjectStore::open(&config.storage_root).await?;

    if !store.exists(&oid).await {
        error!("❌ Object {} is not stored. Nothing to do.", oid);
        std::process::exit(1);
    }

    store.remove(&oid).await?;
    info!("🗑️  Removed object {}", oid);
    Ok(())
}
