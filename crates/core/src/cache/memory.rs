//! In-memory cache store.
//!
//! Reference backend used by tests and by hosts without a native cache
//! storage. Entries live in an insertion-ordered list behind a tokio
//! `RwLock` per generation: per-key atomicity, and the ignore-search scan
//! always resolves to the earliest-stored match, so lookups are
//! reproducible the way a host cache's first-match semantics are.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Cache, CacheKey, CacheStorage, StoredResponse};
use crate::error::Result;
use crate::http::MatchOptions;

/// One in-memory cache generation.
#[derive(Default)]
pub struct MemoryCache {
    entries: RwLock<Vec<(CacheKey, StoredResponse)>>,
}

#[async_trait]
impl Cache for MemoryCache {
    async fn put(&self, key: CacheKey, entry: StoredResponse) -> Result<()> {
        let mut entries = self.entries.write().await;
        // Overwriting keeps the entry's original position in scan order.
        if let Some(slot) = entries.iter_mut().find(|(stored_key, _)| *stored_key == key) {
            slot.1 = entry;
        } else {
            entries.push((key, entry));
        }
        Ok(())
    }

    async fn lookup(&self, key: &CacheKey, options: MatchOptions) -> Result<Option<StoredResponse>> {
        let entries = self.entries.read().await;

        // Exact hit first; the ignore-search scan only runs on a miss.
        if let Some((_, entry)) = entries.iter().find(|(stored_key, _)| stored_key == key) {
            return Ok(Some(entry.clone()));
        }

        if options.ignore_search {
            for (stored_key, entry) in entries.iter() {
                if key.matches(stored_key, options) {
                    return Ok(Some(entry.clone()));
                }
            }
        }

        Ok(None)
    }

    async fn delete_entry(&self, key: &CacheKey) -> Result<bool> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|(stored_key, _)| stored_key != key);
        Ok(entries.len() < before)
    }

    async fn keys(&self) -> Result<Vec<CacheKey>> {
        let entries = self.entries.read().await;
        Ok(entries.iter().map(|(key, _)| key.clone()).collect())
    }
}

/// In-memory collection of named generations.
#[derive(Default)]
pub struct MemoryCacheStorage {
    caches: RwLock<HashMap<String, Arc<MemoryCache>>>,
}

impl MemoryCacheStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheStorage for MemoryCacheStorage {
    async fn open(&self, name: &str) -> Result<Arc<dyn Cache>> {
        let mut caches = self.caches.write().await;
        let cache = caches.entry(name.to_string()).or_default();
        Ok(Arc::clone(cache) as Arc<dyn Cache>)
    }

    async fn names(&self) -> Result<Vec<String>> {
        let caches = self.caches.read().await;
        Ok(caches.keys().cloned().collect())
    }

    async fn delete(&self, name: &str) -> Result<bool> {
        let mut caches = self.caches.write().await;
        Ok(caches.remove(name).is_some())
    }
}
