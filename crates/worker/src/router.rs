//! Request router.
//!
//! The router is the engine's single entry point per intercepted request:
//! it decides whether to intercept at all (GET, same-origin), classifies
//! the request, and dispatches it to the selected strategy.

use std::sync::Arc;

use url::Url;

use airgap_core::{CacheStorage, Error, Request, Result, WorkerConfig};

use crate::classify::classify;
use crate::fetch::Fetcher;
use crate::strategy::{Served, Strategy, StrategyEngine};

/// Routes intercepted requests to a strategy, or declines to intercept.
pub struct Router {
    config: Arc<WorkerConfig>,
    scope: Url,
    engine: StrategyEngine,
}

impl Router {
    pub fn new(config: Arc<WorkerConfig>, storage: Arc<dyn CacheStorage>, fetcher: Arc<dyn Fetcher>) -> Result<Self> {
        let scope = config.scope_url().map_err(|e| Error::InvalidUrl(e.to_string()))?;
        let engine = StrategyEngine::new(Arc::clone(&config), storage, fetcher);
        Ok(Self { config, scope, engine })
    }

    /// Whether this request is ours to handle. Non-GET methods and
    /// cross-origin requests always pass through untouched.
    pub fn should_intercept(&self, request: &Request) -> bool {
        request.method.is_get() && request.url.origin() == self.scope.origin()
    }

    /// Handle one intercepted request.
    ///
    /// `Ok(None)` means "not intercepted": the host applies its default
    /// handling. That is never an error.
    pub async fn handle(&self, request: &Request) -> Result<Option<Served>> {
        if !self.should_intercept(request) {
            tracing::debug!(method = %request.method, url = %request.url, "pass through");
            return Ok(None);
        }

        let class = classify(request, &self.config.static_extensions);
        let strategy = Strategy::for_class(class);
        tracing::debug!(url = %request.url, ?class, ?strategy, "routing");

        let served = self.engine.serve(strategy, request).await?;
        Ok(Some(served))
    }
}
