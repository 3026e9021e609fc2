//! Cache store abstraction.
//!
//! A store holds named cache generations; each generation maps request keys
//! to immutable stored-response snapshots. The traits mirror the host
//! environment's cache storage (`open`/`match`/`put`/`delete`) so the engine
//! can run against the real thing or against [`MemoryCacheStorage`] in tests.
//!
//! Operations are atomic per key but not transactional across keys: two
//! concurrent writes to the same key race and the later completion wins.

mod entry;
mod key;
mod memory;

pub use entry::StoredResponse;
pub use key::CacheKey;
pub use memory::{MemoryCache, MemoryCacheStorage};

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::http::MatchOptions;

/// A single cache generation: request key -> stored response.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Store a snapshot under `key`, overwriting any prior entry whole.
    async fn put(&self, key: CacheKey, entry: StoredResponse) -> Result<()>;

    /// Look up a snapshot. With `ignore_search` set, a key differing only
    /// in its query string still matches.
    async fn lookup(&self, key: &CacheKey, options: MatchOptions) -> Result<Option<StoredResponse>>;

    /// Remove an entry. Returns whether one existed.
    async fn delete_entry(&self, key: &CacheKey) -> Result<bool>;

    /// All keys currently stored, in no particular order.
    async fn keys(&self) -> Result<Vec<CacheKey>>;
}

/// The collection of named cache generations.
#[async_trait]
pub trait CacheStorage: Send + Sync {
    /// Open a generation by name, creating it if absent.
    async fn open(&self, name: &str) -> Result<Arc<dyn Cache>>;

    /// Names of all existing generations.
    async fn names(&self) -> Result<Vec<String>>;

    /// Delete a whole generation. Returns whether it existed.
    async fn delete(&self, name: &str) -> Result<bool>;
}
