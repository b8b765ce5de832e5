use std::sync::Arc;

use schoolhub_db::PoolManager;

use crate::config::ServerConfig;
use crate::storage::ImageStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Owner of the database connection pool.
    pub db: Arc<PoolManager>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// On-disk store for uploaded school images.
    pub images: Arc<ImageStore>,
}
