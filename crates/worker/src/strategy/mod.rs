//! Retrieval strategies.
//!
//! Two strategies cover every intercepted request:
//!
//! - **Network-first** (navigations and unclassified requests): prefer
//!   freshness, fall back to the cache only when the network fails, with
//!   the app shell as the last resort for navigations.
//! - **Stale-while-revalidate** (static assets): serve the cached copy
//!   immediately and refresh the cache in the background.
//!
//! Strategies return a [`Served`] value: the response plus a handle to any
//! background work still in flight, which hosts feed to their keep-alive
//! mechanism.

mod network_first;
mod stale_while_revalidate;

use std::sync::Arc;

use tokio::task::JoinHandle;

use airgap_core::{Cache, CacheKey, CacheStorage, Error, MatchOptions, Method, Request, Response, Result, WorkerConfig};

use crate::classify::RequestClass;
use crate::fetch::Fetcher;

/// The two retrieval strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    NetworkFirst,
    StaleWhileRevalidate,
}

impl Strategy {
    /// Selection table: classification -> strategy.
    pub fn for_class(class: RequestClass) -> Self {
        match class {
            RequestClass::StaticAsset => Strategy::StaleWhileRevalidate,
            RequestClass::Navigation | RequestClass::Other => Strategy::NetworkFirst,
        }
    }
}

/// A strategy's answer: the response to hand back, plus background work
/// (cache revalidation) the host should keep alive until it resolves.
pub struct Served {
    pub response: Response,
    pub background: Option<JoinHandle<()>>,
}

impl Served {
    fn done(response: Response) -> Self {
        Self { response, background: None }
    }

    /// Wait for any background work, then yield the response. Background
    /// failures are already suppressed inside the task; a panic there is
    /// swallowed the same way the host's keep-alive would.
    pub async fn settle(self) -> Response {
        if let Some(handle) = self.background {
            let _ = handle.await;
        }
        self.response
    }
}

/// Runs strategies against a cache store and fetcher.
pub struct StrategyEngine {
    config: Arc<WorkerConfig>,
    storage: Arc<dyn CacheStorage>,
    fetcher: Arc<dyn Fetcher>,
}

impl StrategyEngine {
    pub fn new(config: Arc<WorkerConfig>, storage: Arc<dyn CacheStorage>, fetcher: Arc<dyn Fetcher>) -> Self {
        Self { config, storage, fetcher }
    }

    /// Dispatch a request to the given strategy.
    pub async fn serve(&self, strategy: Strategy, request: &Request) -> Result<Served> {
        match strategy {
            Strategy::NetworkFirst => self.network_first(request).await,
            Strategy::StaleWhileRevalidate => self.stale_while_revalidate(request).await,
        }
    }

    /// The current cache generation, created if absent.
    async fn open_current(&self) -> Result<Arc<dyn Cache>> {
        self.storage.open(&self.config.cache_version).await
    }

    fn match_options(&self) -> MatchOptions {
        MatchOptions { ignore_search: self.config.ignore_search }
    }

    /// Canonical key of the app-shell fallback document.
    fn shell_key(&self) -> Result<CacheKey> {
        let url = self
            .config
            .resolve(&self.config.shell_path)
            .map_err(|e| Error::InvalidUrl(e.to_string()))?;
        Ok(CacheKey::new(Method::Get, url))
    }
}
