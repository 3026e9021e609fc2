//! Network-first strategy.

use airgap_core::{CacheKey, CacheMode, Request, Result, StoredResponse};

use super::{Served, StrategyEngine};

impl StrategyEngine {
    /// Prefer freshness; fall back to the cache only on network failure.
    ///
    /// Fallback order on failure: exact cache entry, then the app-shell
    /// document for navigations, then the network error itself. That last
    /// path is the only observable failure this strategy produces.
    pub(super) async fn network_first(&self, request: &Request) -> Result<Served> {
        let cache = self.open_current().await?;
        let key = CacheKey::from_request(request);

        match self.fetcher.fetch(request, CacheMode::NoStore).await {
            Ok(fresh) => {
                if fresh.is_storable() {
                    // A store failure must not cost the caller a response
                    // the network already delivered.
                    if let Err(err) = cache.put(key, StoredResponse::from_response(&fresh)).await {
                        tracing::warn!(url = %request.url, error = %err, "cache store failed");
                    }

                    // A successful navigation also refreshes the canonical
                    // shell entry, so the offline fallback tracks the
                    // newest document a user has actually seen.
                    if request.is_navigation {
                        match self.shell_key() {
                            Ok(shell) => {
                                if let Err(err) = cache.put(shell, StoredResponse::from_response(&fresh)).await {
                                    tracing::warn!(url = %request.url, error = %err, "shell refresh store failed");
                                }
                            }
                            Err(err) => {
                                tracing::warn!(url = %request.url, error = %err, "shell key unresolvable");
                            }
                        }
                    }
                } else {
                    tracing::debug!(url = %request.url, status = fresh.status, "network-first: not storable");
                }
                Ok(Served::done(fresh))
            }
            Err(err) => {
                tracing::debug!(url = %request.url, error = %err, "network-first: falling back to cache");

                if let Some(entry) = cache.lookup(&key, self.match_options()).await? {
                    return Ok(Served::done(entry.to_response()));
                }

                if request.is_navigation {
                    let shell = self.shell_key()?;
                    if let Some(entry) = cache.lookup(&shell, self.match_options()).await? {
                        tracing::debug!(url = %request.url, "network-first: serving app shell");
                        return Ok(Served::done(entry.to_response()));
                    }
                }

                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use url::Url;

    use airgap_core::{
        CacheKey, CacheMode, CacheStorage, Error, MatchOptions, MemoryCacheStorage, Method, Request, Response,
        StoredResponse, WorkerConfig,
    };

    use super::super::{Strategy, StrategyEngine};
    use crate::testing::{FailingPutStorage, StubFetcher};

    fn config() -> Arc<WorkerConfig> {
        Arc::new(WorkerConfig { scope_origin: "https://app.test".into(), ..Default::default() })
    }

    fn engine(fetcher: Arc<StubFetcher>) -> (StrategyEngine, Arc<MemoryCacheStorage>) {
        let storage = Arc::new(MemoryCacheStorage::new());
        let engine = StrategyEngine::new(config(), storage.clone(), fetcher);
        (engine, storage)
    }

    fn key(url: &str) -> CacheKey {
        CacheKey::new(Method::Get, Url::parse(url).unwrap())
    }

    async fn precache(storage: &MemoryCacheStorage, url: &str, body: &str) {
        let cache = storage.open("shell-v1").await.unwrap();
        let response = Response::new(Url::parse(url).unwrap(), 200).with_body(body.to_string());
        cache.put(key(url), StoredResponse::from_response(&response)).await.unwrap();
    }

    #[tokio::test]
    async fn test_online_serves_fresh_and_updates_cache() {
        let fetcher = Arc::new(StubFetcher::new());
        fetcher.respond("https://app.test/dashboard", 200, "fresh");
        let (engine, storage) = engine(fetcher.clone());

        let request = Request::get(Url::parse("https://app.test/dashboard").unwrap());
        let served = engine.serve(Strategy::NetworkFirst, &request).await.unwrap();
        assert_eq!(&served.response.body[..], b"fresh");

        let cache = storage.open("shell-v1").await.unwrap();
        let entry = cache
            .lookup(&key("https://app.test/dashboard"), MatchOptions::default())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(&entry.body[..], b"fresh");
    }

    #[tokio::test]
    async fn test_fetch_bypasses_intermediate_caches() {
        let fetcher = Arc::new(StubFetcher::new());
        fetcher.respond("https://app.test/dashboard", 200, "fresh");
        let (engine, _) = engine(fetcher.clone());

        let request = Request::get(Url::parse("https://app.test/dashboard").unwrap());
        engine.serve(Strategy::NetworkFirst, &request).await.unwrap();

        let calls = fetcher.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1, CacheMode::NoStore);
    }

    #[tokio::test]
    async fn test_navigation_refreshes_shell_entry() {
        let fetcher = Arc::new(StubFetcher::new());
        fetcher.respond("https://app.test/dashboard", 200, "doc");
        let (engine, storage) = engine(fetcher);

        let request = Request::get(Url::parse("https://app.test/dashboard").unwrap()).navigation();
        engine.serve(Strategy::NetworkFirst, &request).await.unwrap();

        let cache = storage.open("shell-v1").await.unwrap();
        let shell = cache
            .lookup(&key("https://app.test/index.html"), MatchOptions::default())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(&shell.body[..], b"doc");
    }

    #[tokio::test]
    async fn test_store_failure_does_not_mask_fresh_response() {
        let fetcher = Arc::new(StubFetcher::new());
        fetcher.respond("https://app.test/dashboard", 200, "fresh");
        let engine = StrategyEngine::new(config(), Arc::new(FailingPutStorage), fetcher);

        // Navigation exercises both the request-key and shell-key writes.
        let request = Request::get(Url::parse("https://app.test/dashboard").unwrap()).navigation();
        let served = engine.serve(Strategy::NetworkFirst, &request).await.unwrap();
        assert_eq!(&served.response.body[..], b"fresh");
    }

    #[tokio::test]
    async fn test_non_success_not_stored() {
        let fetcher = Arc::new(StubFetcher::new());
        fetcher.respond("https://app.test/missing", 404, "nope");
        let (engine, storage) = engine(fetcher);

        let request = Request::get(Url::parse("https://app.test/missing").unwrap());
        let served = engine.serve(Strategy::NetworkFirst, &request).await.unwrap();
        assert_eq!(served.response.status, 404);

        let cache = storage.open("shell-v1").await.unwrap();
        assert!(cache.keys().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_offline_serves_cached_entry() {
        let fetcher = Arc::new(StubFetcher::new());
        fetcher.set_offline(true);
        let (engine, storage) = engine(fetcher);
        precache(&storage, "https://app.test/dashboard", "stale").await;

        let request = Request::get(Url::parse("https://app.test/dashboard").unwrap());
        let served = engine.serve(Strategy::NetworkFirst, &request).await.unwrap();
        assert_eq!(&served.response.body[..], b"stale");
    }

    #[tokio::test]
    async fn test_offline_cached_match_ignores_search() {
        let fetcher = Arc::new(StubFetcher::new());
        fetcher.set_offline(true);
        let (engine, storage) = engine(fetcher);
        precache(&storage, "https://app.test/dashboard?tab=a", "stale").await;

        let request = Request::get(Url::parse("https://app.test/dashboard?tab=b").unwrap());
        let served = engine.serve(Strategy::NetworkFirst, &request).await.unwrap();
        assert_eq!(&served.response.body[..], b"stale");
    }

    #[tokio::test]
    async fn test_offline_navigation_falls_back_to_shell() {
        let fetcher = Arc::new(StubFetcher::new());
        fetcher.set_offline(true);
        let (engine, storage) = engine(fetcher);
        precache(&storage, "https://app.test/index.html", "shell").await;

        let request = Request::get(Url::parse("https://app.test/dashboard").unwrap()).navigation();
        let served = engine.serve(Strategy::NetworkFirst, &request).await.unwrap();
        assert_eq!(&served.response.body[..], b"shell");
    }

    #[tokio::test]
    async fn test_offline_non_navigation_gets_no_shell() {
        let fetcher = Arc::new(StubFetcher::new());
        fetcher.set_offline(true);
        let (engine, storage) = engine(fetcher);
        precache(&storage, "https://app.test/index.html", "shell").await;

        let request = Request::get(Url::parse("https://app.test/api/users").unwrap());
        let result = engine.serve(Strategy::NetworkFirst, &request).await;
        assert!(matches!(result, Err(Error::Network(_))));
    }

    #[tokio::test]
    async fn test_offline_nothing_cached_propagates_error() {
        let fetcher = Arc::new(StubFetcher::new());
        fetcher.set_offline(true);
        let (engine, _) = engine(fetcher);

        let request = Request::get(Url::parse("https://app.test/dashboard").unwrap()).navigation();
        let result = engine.serve(Strategy::NetworkFirst, &request).await;
        assert!(matches!(result, Err(Error::Network(_))));
    }
}
