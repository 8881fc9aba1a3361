//! Response cache abstraction for the public read surface.
//!
//! Values are opaque, pre-serialized response bodies. The cache never knows
//! which entity a payload came from; callers address entries by key and
//! invalidate keys explicitly after mutations.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::CacheError;

/// Default lifetime of a cached public response.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// Cache keys for the public listing endpoints.
pub mod keys {
    pub const PUBLIC_WINS: &str = "cache:public:wins";
    pub const PUBLIC_PROJECTS: &str = "cache:public:projects";
    pub const PUBLIC_TEAM: &str = "cache:public:team";
    pub const PUBLIC_NEWS: &str = "cache:public:news";
    pub const PUBLIC_PARTNERS: &str = "cache:public:partners";
    pub const PUBLIC_CLUBS: &str = "cache:public:clubs";
    pub const PUBLIC_BLOG: &str = "cache:public:blog";
    pub const PUBLIC_STATS: &str = "cache:public:stats";
}

/// Key-value store with per-key TTL.
#[async_trait]
pub trait ResponseCache: Send + Sync {
    /// Fetch a live entry. Expired entries are misses.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), CacheError>;

    /// Remove every listed key. Missing keys are ignored.
    async fn delete(&self, keys: &[&str]) -> Result<(), CacheError>;
}

struct Entry {
    value: Vec<u8>,
    expires_at: Instant,
}

/// In-process [`ResponseCache`] backed by a `HashMap` behind a `RwLock`.
#[derive(Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop expired entries, returning how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, e| e.expires_at > now);
        before - entries.len()
    }

    /// Number of stored entries, live or expired.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ResponseCache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let entries = self.entries.read().await;
        Ok(entries
            .get(key)
            .filter(|e| e.expires_at > Instant::now())
            .map(|e| e.value.clone()))
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), CacheError> {
        let entry = Entry {
            value,
            expires_at: Instant::now() + ttl,
        };
        self.entries.write().await.insert(key.to_string(), entry);
        Ok(())
    }

    async fn delete(&self, keys: &[&str]) -> Result<(), CacheError> {
        let mut entries = self.entries.write().await;
        for key in keys {
            entries.remove(*key);
        }
        Ok(())
    }
}
