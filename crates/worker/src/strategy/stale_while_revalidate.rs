//! Stale-while-revalidate strategy.

use std::sync::Arc;

use airgap_core::{CacheKey, CacheMode, Request, Result, StoredResponse};

use super::{Served, StrategyEngine};

impl StrategyEngine {
    /// Serve the cached copy immediately; refresh the cache in the
    /// background. When nothing is cached, the network outcome propagates
    /// to the caller exactly once; background refresh failures never do.
    pub(super) async fn stale_while_revalidate(&self, request: &Request) -> Result<Served> {
        let cache = self.open_current().await?;
        let key = CacheKey::from_request(request);

        if let Some(entry) = cache.lookup(&key, self.match_options()).await? {
            tracing::debug!(url = %request.url, "stale-while-revalidate: served from cache");

            let fetcher = Arc::clone(&self.fetcher);
            let request = request.clone();
            let handle = tokio::spawn(async move {
                match fetcher.fetch(&request, CacheMode::Default).await {
                    Ok(fresh) if fresh.is_storable() => {
                        if let Err(err) = cache.put(key, StoredResponse::from_response(&fresh)).await {
                            tracing::warn!(url = %request.url, error = %err, "revalidation store failed");
                        }
                    }
                    Ok(fresh) => {
                        tracing::debug!(url = %request.url, status = fresh.status, "revalidation not storable");
                    }
                    Err(err) => {
                        tracing::warn!(url = %request.url, error = %err, "background revalidation failed");
                    }
                }
            });

            return Ok(Served { response: entry.to_response(), background: Some(handle) });
        }

        // Cache miss: this request waits on the network after all. A store
        // failure must not cost the caller the response it waited for.
        let fresh = self.fetcher.fetch(request, CacheMode::Default).await?;
        if fresh.is_storable() {
            if let Err(err) = cache.put(key, StoredResponse::from_response(&fresh)).await {
                tracing::warn!(url = %request.url, error = %err, "cache store failed");
            }
        }
        Ok(Served { response: fresh, background: None })
    }
}
