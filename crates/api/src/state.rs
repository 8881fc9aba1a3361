use std::sync::Arc;

use crate::cache::CacheHandle;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the pool and cache are reference-counted handles.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: itam_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Public response cache.
    pub cache: CacheHandle,
}
