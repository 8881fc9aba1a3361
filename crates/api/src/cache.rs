//! Best-effort front for the response cache backend.
//!
//! Backend failures are logged and degrade to a miss (reads) or a no-op
//! (writes, invalidation); the cache never fails a request.

use std::sync::Arc;
use std::time::Duration;

use itam_core::cache::ResponseCache;

#[derive(Clone)]
pub struct CacheHandle {
    backend: Arc<dyn ResponseCache>,
    ttl: Duration,
}

impl CacheHandle {
    pub fn new(backend: Arc<dyn ResponseCache>, ttl: Duration) -> Self {
        Self { backend, ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub async fn get(&self, key: &str) -> Option<Vec<u8>> {
        match self.backend.get(key).await {
            Ok(hit) => hit,
            Err(e) => {
                tracing::warn!(error = %e, key, "Cache read failed, treating as miss");
                None
            }
        }
    }

    pub async fn set(&self, key: &str, value: Vec<u8>) {
        if let Err(e) = self.backend.set(key, value, self.ttl).await {
            tracing::warn!(error = %e, key, "Cache write failed");
        }
    }

    /// Delete every key in `keys`.
    pub async fn invalidate(&self, keys: &[&str]) {
        if keys.is_empty() {
            return;
        }
        match self.backend.delete(keys).await {
            Ok(()) => tracing::debug!(?keys, "Cache invalidated"),
            Err(e) => tracing::warn!(error = %e, ?keys, "Cache invalidation failed"),
        }
    }
}
