pub mod api;
pub mod config;
pub mod models;
pub mod services;
pub mod utils;

use crate::config::ServerConfig;
use crate::services::batch::BatchNegotiator;
use crate::services::store::ObjectStore;
use crate::services::transfer::TransferService;
use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ObjectStore>,
    pub transfers: Arc<TransferService>,
    pub negotiator: Arc<BatchNegotiator>,
    pub config: ServerConfig,
}

impl AppState {
    /// Opens the object store under the configured root and wires up the
    /// services. The store root and size cap travel in explicitly; nothing
    /// below this point reads ambient configuration.
    pub async fn new(config: ServerConfig) -> anyhow::Result<Self> {
        let store = Arc::new(ObjectStore::open(&config.storage_root).await?);
        let transfers = Arc::new(TransferService::new(
            store.clone(),
            config.max_object_size,
        ));
        let negotiator = Arc::new(BatchNegotiator::new(
            store.clone(),
            config.max_object_size,
        ));

        Ok(AppState {
            store,
            transfers,
            negotiator,
            config,
        })
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(api::handlers::health_check))
        .route("/objects/batch", post(api::handlers::batch))
        .route(
            "/objects/:oid",
            put(api::handlers::upload_object).get(api::handlers::download_object),
        )
        .with_state(state)
}
