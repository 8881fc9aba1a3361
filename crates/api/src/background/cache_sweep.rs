//! Periodic purge of expired response-cache entries.
//!
//! Expired entries are already misses on read; the sweep only bounds memory.

use std::sync::Arc;
use std::time::Duration;

use itam_core::cache::MemoryCache;
use tokio_util::sync::CancellationToken;

/// Run the sweep loop until `cancel` is triggered.
pub async fn run(cache: Arc<MemoryCache>, every: Duration, cancel: CancellationToken) {
    tracing::info!(interval_secs = every.as_secs(), "Cache sweep job started");

    let mut interval = tokio::time::interval(every);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Cache sweep job stopping");
                break;
            }
            _ = interval.tick() => {
                let purged = cache.purge_expired().await;
                if purged > 0 {
                    tracing::debug!(purged, "Cache sweep: dropped expired entries");
                }
            }
        }
    }
}
